use crate::review::ReviewPage;
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use tracing::error;

const TEMPLATE_SOURCES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("plan.html", include_str!("../templates/plan.html")),
    ("introspection.html", include_str!("../templates/introspection.html")),
    ("review.html", include_str!("../templates/review.html")),
];

const PLAN_MARKDOWN: &str = include_str!("../content/plan.md");

// `.html` names get HTML auto-escaping; answers are user text.
static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATE_SOURCES {
        if let Err(err) = env.add_template(name, source) {
            error!("failed to parse template {name}: {err}");
        }
    }
    env
});

static PLAN_HTML: Lazy<String> = Lazy::new(|| markdown_to_html(PLAN_MARKDOWN));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptField {
    pub index: usize,
    pub number: usize,
    pub question: String,
    pub answer: String,
}

/// Everything the introspection form needs, including the draft answers
/// carried over from a failed submit.
#[derive(Debug, Clone, Serialize)]
pub struct IntrospectionView {
    pub date: String,
    pub fields: Vec<PromptField>,
    pub notices: Vec<Notice>,
}

impl IntrospectionView {
    pub fn new<S: AsRef<str>>(date: impl Into<String>, prompts: &[S], draft: &[String]) -> Self {
        let fields = prompts
            .iter()
            .enumerate()
            .map(|(index, question)| PromptField {
                index,
                number: index + 1,
                question: question.as_ref().to_string(),
                answer: draft.get(index).cloned().unwrap_or_default(),
            })
            .collect();
        Self {
            date: date.into(),
            fields,
            notices: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

pub fn render_plan() -> Result<String, minijinja::Error> {
    TEMPLATES.get_template("plan.html")?.render(context! {
        page => "home",
        notices => Vec::<Notice>::new(),
        plan_html => PLAN_HTML.as_str(),
    })
}

pub fn render_introspection(view: &IntrospectionView) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template("introspection.html")?.render(context! {
        page => "introspection",
        notices => &view.notices,
        date => &view.date,
        fields => &view.fields,
    })
}

pub fn render_review(review: &ReviewPage, notices: &[Notice]) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template("review.html")?.render(context! {
        page => "review",
        notices => notices,
        dates => &review.dates,
        selected => &review.selected,
        entry => &review.entry,
    })
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut body = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut body, parser);
    body
}
