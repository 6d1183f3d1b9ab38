use serde::Serialize;

/// 问卷选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub label: &'static str,
    pub emoji: &'static str,
}

/// 问卷题目，静态数据，整个会话只读
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    /// 题号，从 1 开始连续
    pub id: u8,
    pub prompt: &'static str,
    pub emoji: Option<&'static str>,
    pub options: &'static [QuizOption],
}

impl QuizQuestion {
    /// 按标签查找选项
    pub fn option(&self, label: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

/// 已作答的答案，按作答顺序保存，只增不减
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    entries: Vec<(u8, String)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录某题答案；同一题重复记录时覆盖原值，不改变顺序
    pub fn record(&mut self, question_id: u8, label: impl Into<String>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(id, _)| *id == question_id) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((question_id, label)),
        }
    }

    pub fn get(&self, question_id: u8) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| *id == question_id)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.entries.iter().map(|(id, label)| (*id, label.as_str()))
    }
}
