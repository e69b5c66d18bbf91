//! HTML rendering.
//!
//! Templates are compiled into the binary and rendered by name with
//! `minijinja`. Auto-escaping is on for `.html` templates, so values echoed
//! back to the user cannot inject markup.

use minijinja::Environment;
use serde::Serialize;

pub const REGISTER_TEMPLATE: &str = "register.html";

pub type RenderError = minijinja::Error;

/// Parameters of the registration page.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPage<'a> {
    pub submitted: bool,
    pub full_name: Option<&'a str>,
}

impl<'a> RegisterPage<'a> {
    pub fn form() -> Self {
        Self {
            submitted: false,
            full_name: None,
        }
    }

    pub fn submitted(full_name: &'a str) -> Self {
        Self {
            submitted: true,
            full_name: Some(full_name),
        }
    }
}

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(REGISTER_TEMPLATE, include_str!("../templates/register.html"))?;
        Ok(Self { env })
    }

    /// Render the template called `name` with `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, RenderError> {
        self.env.get_template(name)?.render(context)
    }

    pub fn register(&self, page: &RegisterPage<'_>) -> Result<String, RenderError> {
        self.render(REGISTER_TEMPLATE, page)
    }
}
