use serde::{Deserialize, Serialize};

/// One question embedded in a Test. Questions only exist inside their
/// parent Test's `questions` array and are addressed by their numeric
/// `id` within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub instruction_image: Option<String>,
    #[serde(default)]
    pub instruction_image_height: Option<i64>,
    pub question: QuestionText,
    pub options: Vec<String>,
    pub correct_answer: i64,
    #[serde(default)]
    pub solution_text: Option<String>,
    #[serde(default)]
    pub solution_image: Option<String>,
}

/// Question text in both display languages. Either side may be absent
/// when a test is authored in a single language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionText {
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub hi: Option<String>,
}
