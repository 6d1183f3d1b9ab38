//! 界面渲染 - 展示层
//!
//! 只读取会话状态生成文本，并把终端输入翻译成 `Intent`，从不直接修改状态

use std::fmt::Write;

use crate::models::Visitor;
use crate::services::quiz_service;
use crate::workflow::{AddressPhase, FunnelSession, Intent, Screen};

const RULE_WIDTH: usize = 48;

/// 渲染当前界面
pub fn render(session: &FunnelSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));

    match session.screen() {
        Screen::Intro { error } => {
            let _ = writeln!(out, "🎁 Responda nossa pesquisa e ganhe um presente!");
            let _ = writeln!(out, "Informe seu nome completo e seu e-mail para começar.");
            if let Some(error) = error {
                let _ = writeln!(out, "⚠️  {}", error);
            }
        }
        Screen::Quiz { step, selected } => {
            render_quiz(&mut out, *step, selected.as_deref());
        }
        Screen::Promotion { phase } => {
            render_promotion(&mut out, session.visitor(), phase);
        }
        Screen::Redirected => {
            let _ = writeln!(out, "Redirecionando para o pagamento: {}", session.payment_url());
        }
    }

    out
}

fn render_quiz(out: &mut String, step: u8, selected: Option<&str>) {
    let question = quiz_service::question_by_id(step);
    let total = quiz_service::total_questions();
    let percent = quiz_service::progress_percent(step);

    let filled = (percent / 100.0 * 20.0).round() as usize;
    let _ = writeln!(
        out,
        "Pergunta {} de {}  [{}{}] {:.0}%",
        step,
        total,
        "█".repeat(filled),
        "░".repeat(20 - filled.min(20)),
        percent
    );
    let _ = writeln!(
        out,
        "{} {}",
        question.emoji.unwrap_or(""),
        question.prompt
    );
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(option.label) { "●" } else { "○" };
        let _ = writeln!(out, "  {} {}. {} {}", marker, i + 1, option.emoji, option.label);
    }
    let _ = writeln!(out, "(digite o número da opção, Enter para continuar)");
}

fn render_promotion(out: &mut String, visitor: Option<&Visitor>, phase: &AddressPhase) {
    match visitor {
        Some(visitor) => {
            let _ = writeln!(out, "🎉 Parabéns, {}! Você ganhou um presente.", visitor.first_name());
        }
        None => {
            let _ = writeln!(out, "🎉 Parabéns! Você ganhou um presente.");
        }
    }

    match phase {
        AddressPhase::Idle { input, not_found } => {
            if *not_found {
                let _ = writeln!(out, "⚠️  CEP não encontrado. Por favor, tente novamente.");
            }
            let _ = writeln!(out, "Digite seu CEP para verificar a disponibilidade na sua região.");
            if !input.is_empty() {
                let _ = writeln!(out, "CEP: {}", input);
            }
        }
        AddressPhase::Verifying { postal_code, .. } => {
            let _ = writeln!(out, "⏳ Verificando disponibilidade para o CEP {}...", postal_code);
        }
        AddressPhase::Resolved {
            postal_code,
            address,
            quote,
        } => {
            let _ = writeln!(out, "✅ Disponível para o CEP {}", postal_code);
            let _ = writeln!(out, "📍 {}", address.display_line());
            let _ = writeln!(out, "Frete único: R$ {}", quote.fee_display());
            let _ = writeln!(
                out,
                "Estoque: apenas {} unidades disponíveis para sua região.",
                quote.stock_count
            );
            let _ = writeln!(out, "Envio previsto: {}", quote.delivery_date_display());
            let _ = writeln!(out, "(Enter para ir ao pagamento)");
        }
    }
}

/// 把一行终端输入翻译成操作序列
///
/// Intro 界面需要两项输入，由调用方分别读取后直接构造 `Intent::SubmitIntro`
pub fn parse_intents(session: &FunnelSession, line: &str) -> Vec<Intent> {
    let line = line.trim();

    match session.screen() {
        Screen::Intro { .. } | Screen::Redirected => Vec::new(),
        Screen::Quiz { step, .. } => {
            if line.is_empty() {
                return vec![Intent::Continue];
            }
            let question = quiz_service::question_by_id(*step);
            let label = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| question.options.get(i))
                .map(|o| o.label.to_string())
                .unwrap_or_else(|| line.to_string());
            vec![Intent::SelectOption(label)]
        }
        Screen::Promotion { phase } => match phase {
            AddressPhase::Idle { .. } if line.is_empty() => vec![Intent::SubmitPostalCode],
            AddressPhase::Idle { .. } => vec![
                Intent::EditPostalCode(line.to_string()),
                Intent::SubmitPostalCode,
            ],
            AddressPhase::Verifying { .. } => Vec::new(),
            AddressPhase::Resolved { .. } => vec![Intent::GoToPayment],
        },
    }
}
