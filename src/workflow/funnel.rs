//! 漏斗状态机 - 流程层
//!
//! 核心职责：决定当前显示哪个界面、接受哪些操作
//!
//! 界面顺序：
//! 1. Intro（姓名 + 邮箱）
//! 2. Quiz（第 1..6 题）
//! 3. Promotion（CEP：Idle → Verifying → Resolved）
//! 4. Redirected（跳转支付，结束）
//!
//! 每个界面的数据只存在于对应的枚举分支里，不会出现"校验中"与"已完成"同时为真的组合。

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{FunnelError, FunnelResult, IntroError};
use crate::models::{
    AddressLookupResult, AnswerSet, PostalCode, QuizQuestion, ShippingQuote, Visitor,
};
use crate::services::{
    draw_quote, format_postal_code, parse_postal_code, quiz_service, validate_intro,
};
use crate::utils::logging::log_session_summary;
use crate::workflow::address_flow::LookupOutcome;

/// 当前界面
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// 开场表单，`error` 为上一次提交的校验错误
    Intro { error: Option<IntroError> },
    /// 问卷，`step` 为当前题号
    Quiz { step: u8, selected: Option<String> },
    /// 优惠页及其中的 CEP 子流程
    Promotion { phase: AddressPhase },
    /// 已跳转到支付页面
    Redirected,
}

/// CEP 子流程的三个互斥阶段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AddressPhase {
    /// 等待输入；`not_found` 表示上一次查询没有结果
    Idle { input: String, not_found: bool },
    /// 查询进行中，输入框内容保留以便失败后继续编辑
    Verifying { postal_code: PostalCode, input: String },
    /// 查询成功，报价已冻结
    Resolved {
        postal_code: PostalCode,
        address: AddressLookupResult,
        quote: ShippingQuote,
    },
}

/// 界面层上报的用户操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitIntro { name: String, email: String },
    SelectOption(String),
    Continue,
    EditPostalCode(String),
    SubmitPostalCode,
    GoToPayment,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SubmitIntro { .. } => "submit_intro",
            Intent::SelectOption(_) => "select_option",
            Intent::Continue => "continue",
            Intent::EditPostalCode(_) => "edit_postal_code",
            Intent::SubmitPostalCode => "submit_postal_code",
            Intent::GoToPayment => "go_to_payment",
        }
    }
}

/// 操作成功后需要外部执行的副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// 已进入 Verifying，调用方需要执行查询并调用 `complete_verification`
    StartVerification(PostalCode),
    /// 整页跳转到支付地址
    Redirect(String),
}

/// 一次访问的完整会话状态（仅内存）
#[derive(Debug, Clone, Serialize)]
pub struct FunnelSession {
    visitor: Option<Visitor>,
    answers: AnswerSet,
    #[serde(flatten)]
    screen: Screen,
    #[serde(skip)]
    payment_url: String,
    #[serde(skip)]
    shipping_fee: Decimal,
}

impl FunnelSession {
    /// 创建新的会话，初始界面为 Intro
    pub fn new(config: &Config) -> Self {
        Self {
            visitor: None,
            answers: AnswerSet::new(),
            screen: Screen::Intro { error: None },
            payment_url: config.payment_url.clone(),
            shipping_fee: config.shipping_fee,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn visitor(&self) -> Option<&Visitor> {
        self.visitor.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn payment_url(&self) -> &str {
        &self.payment_url
    }

    /// 当前题号，仅在 Quiz 界面有值
    pub fn current_step(&self) -> Option<u8> {
        match &self.screen {
            Screen::Quiz { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn selected_option(&self) -> Option<&str> {
        match &self.screen {
            Screen::Quiz { selected, .. } => selected.as_deref(),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        self.current_step().map(quiz_service::question_by_id)
    }

    /// 问卷进度百分比，仅在 Quiz 界面有值
    pub fn progress_percent(&self) -> Option<f64> {
        self.current_step().map(quiz_service::progress_percent)
    }

    pub fn address_phase(&self) -> Option<&AddressPhase> {
        match &self.screen {
            Screen::Promotion { phase } => Some(phase),
            _ => None,
        }
    }

    /// 界面名称（用于日志与错误信息）
    pub fn screen_name(&self) -> &'static str {
        match &self.screen {
            Screen::Intro { .. } => "intro",
            Screen::Quiz { .. } => "quiz",
            Screen::Promotion { phase } => match phase {
                AddressPhase::Idle { .. } => "address_idle",
                AddressPhase::Verifying { .. } => "address_verifying",
                AddressPhase::Resolved { .. } => "address_resolved",
            },
            Screen::Redirected => "redirected",
        }
    }

    /// 处理一个用户操作
    ///
    /// 返回 `Err` 时状态不变（Intro 的错误提示除外，它本身就是 Intro 状态的一部分）
    pub fn apply(&mut self, intent: Intent) -> FunnelResult<Effect> {
        let unexpected = FunnelError::UnexpectedIntent {
            intent: intent.name(),
            screen: self.screen_name(),
        };
        debug!("操作 {} @ {}", intent.name(), self.screen_name());

        let handled = match intent {
            Intent::SubmitIntro { name, email } => self.submit_intro(&name, &email),
            Intent::SelectOption(label) => self.select_option(label),
            Intent::Continue => self.continue_quiz(),
            Intent::EditPostalCode(raw) => self.edit_postal_code(&raw),
            Intent::SubmitPostalCode => self.submit_postal_code(),
            Intent::GoToPayment => self.go_to_payment(),
        };

        handled.unwrap_or(Err(unexpected))
    }

    // ========== 各界面的操作 ==========
    // 返回 None 表示当前界面不接受该操作

    fn submit_intro(&mut self, name: &str, email: &str) -> Option<FunnelResult<Effect>> {
        let Screen::Intro { error } = &mut self.screen else {
            return None;
        };

        match validate_intro(name, email) {
            Ok(visitor) => {
                info!("✓ 访客 {} 开始问卷", visitor.first_name());
                self.visitor = Some(visitor);
                self.screen = Screen::Quiz {
                    step: 1,
                    selected: None,
                };
                Some(Ok(Effect::None))
            }
            Err(e) => {
                *error = Some(e);
                Some(Err(e.into()))
            }
        }
    }

    fn select_option(&mut self, label: String) -> Option<FunnelResult<Effect>> {
        let Screen::Quiz { step, selected } = &mut self.screen else {
            return None;
        };

        if quiz_service::question_by_id(*step).option(&label).is_none() {
            return Some(Err(FunnelError::UnknownOption { label }));
        }
        *selected = Some(label);
        Some(Ok(Effect::None))
    }

    fn continue_quiz(&mut self) -> Option<FunnelResult<Effect>> {
        let Screen::Quiz { step, selected } = &mut self.screen else {
            return None;
        };

        let Some(label) = selected.take() else {
            return Some(Err(FunnelError::NoOptionSelected));
        };
        let answered = *step;

        if answered >= quiz_service::last_question_id() {
            self.answers.record(answered, label);
            info!("✓ 问卷完成，共 {} 个答案", self.answers.len());
            self.screen = Screen::Promotion {
                phase: AddressPhase::Idle {
                    input: String::new(),
                    not_found: false,
                },
            };
        } else {
            *step = answered + 1;
            debug!("进入第 {} 题", answered + 1);
            self.answers.record(answered, label);
        }
        Some(Ok(Effect::None))
    }

    fn edit_postal_code(&mut self, raw: &str) -> Option<FunnelResult<Effect>> {
        let Screen::Promotion {
            phase: AddressPhase::Idle { input, not_found },
        } = &mut self.screen
        else {
            return None;
        };

        // 未找到的提示只针对上一次提交，重新输入后清除
        *input = format_postal_code(raw);
        *not_found = false;
        Some(Ok(Effect::None))
    }

    fn submit_postal_code(&mut self) -> Option<FunnelResult<Effect>> {
        let Screen::Promotion {
            phase: AddressPhase::Idle { input, .. },
        } = &mut self.screen
        else {
            return None;
        };

        let Some(postal_code) = parse_postal_code(input) else {
            return Some(Err(FunnelError::IncompletePostalCode));
        };
        info!("🔍 开始校验 CEP {}", postal_code);

        let input = std::mem::take(input);
        self.screen = Screen::Promotion {
            phase: AddressPhase::Verifying {
                postal_code: postal_code.clone(),
                input,
            },
        };
        Some(Ok(Effect::StartVerification(postal_code)))
    }

    fn go_to_payment(&mut self) -> Option<FunnelResult<Effect>> {
        if !matches!(
            self.screen,
            Screen::Promotion {
                phase: AddressPhase::Resolved { .. }
            }
        ) {
            return None;
        }

        log_session_summary(self.visitor.as_ref(), &self.answers, &self.payment_url);
        self.screen = Screen::Redirected;
        Some(Ok(Effect::Redirect(self.payment_url.clone())))
    }

    /// 结束 Verifying 阶段
    ///
    /// 找到地址时生成报价并进入 Resolved；否则回到 Idle，保留输入并标记未找到
    ///
    /// # 参数
    /// - `outcome`: 查询结果
    /// - `today`: 校验完成当天，用于计算送达日期
    /// - `rng`: 库存随机数源
    pub fn complete_verification<R: Rng>(
        &mut self,
        outcome: LookupOutcome,
        today: NaiveDate,
        rng: &mut R,
    ) -> FunnelResult<()> {
        let Screen::Promotion {
            phase: AddressPhase::Verifying { postal_code, input },
        } = &mut self.screen
        else {
            return Err(FunnelError::NotVerifying);
        };

        let postal_code = postal_code.clone();
        let input = std::mem::take(input);

        let phase = match outcome {
            LookupOutcome::Found(address) => {
                let quote = draw_quote(self.shipping_fee, today, rng);
                info!(
                    "✓ CEP {} 校验通过: {}/{}，库存 {}，预计 {}",
                    postal_code,
                    address.city,
                    address.region,
                    quote.stock_count,
                    quote.delivery_date_display()
                );
                AddressPhase::Resolved {
                    postal_code,
                    address,
                    quote,
                }
            }
            LookupOutcome::NotFound => {
                info!("CEP {} 未找到，等待重新输入", postal_code);
                AddressPhase::Idle {
                    input,
                    not_found: true,
                }
            }
        };

        self.screen = Screen::Promotion { phase };
        Ok(())
    }
}
