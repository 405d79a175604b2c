use super::ConfigSink;

/// Command-line tokens, one `section.key=value` per entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentSink {
    tokens: Vec<String>,
}

impl ArgumentSink {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn render(&self) -> String {
        let mut out = self.tokens.join("\n");
        out.push('\n');
        out
    }
}

impl ConfigSink for ArgumentSink {
    fn set(&mut self, section: &str, key: &str, value: String) {
        self.tokens.push(format!("{section}.{key}={value}"));
    }
}
