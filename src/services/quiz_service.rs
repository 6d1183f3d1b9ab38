//! 问卷服务
//!
//! 固定的六道题，顺序与内容在运行时不会改变

use crate::models::{QuizOption, QuizQuestion};

const fn opt(label: &'static str, emoji: &'static str) -> QuizOption {
    QuizOption { label, emoji }
}

/// 问卷题库（只读）
pub static QUIZ_QUESTIONS: [QuizQuestion; 6] = [
    QuizQuestion {
        id: 1,
        prompt: "Como você avalia a qualidade dos nossos chocolates?",
        emoji: Some("🍫"),
        options: &[
            opt("Excelente", "😍"),
            opt("Boa", "😊"),
            opt("Regular", "😐"),
            opt("Ruim", "😕"),
        ],
    },
    QuizQuestion {
        id: 2,
        prompt: "Qual a sua linha de produtos favorita?",
        emoji: Some("🍬"),
        options: &[
            opt("Cremosos", "🍦"),
            opt("Tabletes", "🍫"),
            opt("Bombons", "🎁"),
            opt("Recheados", "🥮"),
        ],
    },
    QuizQuestion {
        id: 3,
        prompt: "Você já experimentou algum dos nossos ovos de Páscoa?",
        emoji: Some("🐇"),
        options: &[
            opt("Sim, todo ano", "🥚"),
            opt("Sim, ocasionalmente", "🐣"),
            opt("Raramente", "🐰"),
            opt("Nunca experimentei", "❌"),
        ],
    },
    QuizQuestion {
        id: 4,
        prompt: "Qual característica você mais valoriza nos nossos produtos?",
        emoji: Some("✨"),
        options: &[
            opt("Sabor", "😋"),
            opt("Preço", "💰"),
            opt("Variedade", "🧩"),
            opt("Embalagem", "🎀"),
        ],
    },
    QuizQuestion {
        id: 5,
        prompt: "Com que frequência você visita uma de nossas lojas?",
        emoji: Some("🏬"),
        options: &[
            opt("Semanalmente", "📅"),
            opt("Mensalmente", "📆"),
            opt("Em datas especiais", "🎂"),
            opt("Raramente", "🕰️"),
        ],
    },
    QuizQuestion {
        id: 6,
        prompt: "Você nos recomendaria para amigos e familiares?",
        emoji: Some("👪"),
        options: &[
            opt("Com certeza", "👍"),
            opt("Provavelmente", "🤔"),
            opt("Talvez", "🤷"),
            opt("Não recomendaria", "👎"),
        ],
    },
];

/// 全部题目（按题号排序）
pub fn questions() -> &'static [QuizQuestion] {
    &QUIZ_QUESTIONS
}

/// 题目总数
pub fn total_questions() -> u8 {
    QUIZ_QUESTIONS.len() as u8
}

/// 最后一题的题号
pub fn last_question_id() -> u8 {
    total_questions()
}

/// 按题号取题，找不到时返回第一题
pub fn question_by_id(id: u8) -> &'static QuizQuestion {
    QUIZ_QUESTIONS
        .iter()
        .find(|q| q.id == id)
        .unwrap_or(&QUIZ_QUESTIONS[0])
}

/// 进度百分比：`step / total × 100`
pub fn progress_percent(step: u8) -> f64 {
    f64::from(step) / f64::from(total_questions()) * 100.0
}
