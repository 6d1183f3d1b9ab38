use serde::Serialize;

/// 访客信息，开场表单校验通过后创建，之后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visitor {
    pub name: String,
    pub email: String,
}

impl Visitor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// 名字的第一个词，用于问候语
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
