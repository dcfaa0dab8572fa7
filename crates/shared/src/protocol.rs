use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanStyle {
    pub bold: bool,
}

/// One run of text with its style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub text: String,
    #[serde(default)]
    pub style: SpanStyle,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle { bold: false },
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle { bold: true },
        }
    }

    pub fn is_bold(&self) -> bool {
        self.style.bold
    }
}

/// One frame of output. Ephemeral parts are retracted before the next part renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub spans: Vec<StyledSpan>,
    #[serde(default)]
    pub ephemeral: bool,
    #[serde(default)]
    pub override_prompt: Option<String>,
}

impl ResponsePart {
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self {
            spans,
            ephemeral: false,
            override_prompt: None,
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn with_override_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.override_prompt = Some(prompt.into());
        self
    }
}

/// Everything one command invocation produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub parts: Vec<ResponsePart>,
}

impl ResponseEnvelope {
    pub fn new(parts: Vec<ResponsePart>) -> Self {
        Self { parts }
    }

    pub fn single(part: ResponsePart) -> Self {
        Self { parts: vec![part] }
    }

    pub fn from_json(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    /// Text of the first span of the first part, used as the display title.
    pub fn title(&self) -> Option<&str> {
        self.parts
            .first()
            .and_then(|part| part.spans.first())
            .map(|span| span.text.as_str())
    }
}
