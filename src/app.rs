use crate::clients::{AddressLookup, ViaCepClient};
use crate::config::Config;
use crate::view::{parse_intents, render};
use crate::workflow::{AddressFlow, Effect, FunnelSession, Intent, Screen};
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info};

/// 应用主结构
///
/// 事件循环：读取一行输入 → 翻译成操作 → 交给状态机 → 执行副作用 → 重新渲染
pub struct App<L> {
    session: FunnelSession,
    flow: AddressFlow<L>,
}

impl App<ViaCepClient> {
    /// 使用 ViaCEP 初始化应用
    pub fn initialize(config: &Config) -> Self {
        Self::with_lookup(config, ViaCepClient::new(config))
    }

    /// 从标准输入读取操作，界面输出到标准输出
    pub async fn run(&mut self) -> Result<Option<String>> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run_with(stdin, &mut stdout).await
    }
}

impl<L: AddressLookup> App<L> {
    pub fn with_lookup(config: &Config, lookup: L) -> Self {
        Self {
            session: FunnelSession::new(config),
            flow: AddressFlow::new(lookup, config),
        }
    }

    pub fn session(&self) -> &FunnelSession {
        &self.session
    }

    /// 运行事件循环
    ///
    /// # 返回
    /// 到达支付跳转时返回跳转地址；输入提前结束时返回 `None`
    pub async fn run_with<I, W>(&mut self, input: I, out: &mut W) -> Result<Option<String>>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            write!(out, "{}", render(&self.session))?;
            out.flush()?;

            if matches!(self.session.screen(), Screen::Intro { .. }) {
                let Some(intent) = read_intro(&mut lines, out).await? else {
                    return Ok(end_of_input());
                };
                if let Err(e) = self.session.apply(intent) {
                    // 错误提示已经是 Intro 状态的一部分，下一轮渲染时显示
                    debug!("开场表单未通过: {}", e);
                }
                continue;
            }

            let Some(line) = lines.next_line().await? else {
                return Ok(end_of_input());
            };

            for intent in parse_intents(&self.session, &line) {
                match self.session.apply(intent) {
                    Ok(Effect::None) => {}
                    Ok(Effect::StartVerification(postal_code)) => {
                        write!(out, "{}", render(&self.session))?;
                        out.flush()?;
                        self.flow.resolve(&mut self.session, &postal_code).await?;
                    }
                    Ok(Effect::Redirect(url)) => {
                        write!(out, "{}", render(&self.session))?;
                        out.flush()?;
                        debug!("会话快照: {}", serde_json::to_string(&self.session)?);
                        return Ok(Some(url));
                    }
                    Err(e) => {
                        writeln!(out, "⚠️  {}", e)?;
                        break;
                    }
                }
            }
        }
    }
}

/// 依次读取姓名和邮箱
async fn read_intro<R, W>(lines: &mut Lines<R>, out: &mut W) -> Result<Option<Intent>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "Nome completo: ")?;
    out.flush()?;
    let Some(name) = lines.next_line().await? else {
        return Ok(None);
    };

    write!(out, "E-mail: ")?;
    out.flush()?;
    let Some(email) = lines.next_line().await? else {
        return Ok(None);
    };

    Ok(Some(Intent::SubmitIntro { name, email }))
}

fn end_of_input() -> Option<String> {
    info!("输入结束，会话未完成");
    None
}
