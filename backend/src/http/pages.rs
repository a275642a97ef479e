//! HTML page rendering with minijinja.
//!
//! Templates are compiled into the binary so the server has no runtime
//! dependency on the working directory for its pages.

use minijinja::{context, Environment, Value};
use serde::Serialize;

use crate::api::SessionView;
use crate::gateway::HelpDocument;

const EMBED_TEMPLATE: &str = include_str!("../../templates/embed.html");
const ERROR_TEMPLATE: &str = include_str!("../../templates/error.html");
const HELP_TEMPLATE: &str = include_str!("../../templates/help.html");
const UPLOAD_TEMPLATE: &str = include_str!("../../templates/upload.html");

pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("embed.html", EMBED_TEMPLATE)?;
        env.add_template("error.html", ERROR_TEMPLATE)?;
        env.add_template("help.html", HELP_TEMPLATE)?;
        env.add_template("upload.html", UPLOAD_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Dashboard page with the initial session state inlined.
    pub fn embed(&self, session: &SessionView) -> Result<String, minijinja::Error> {
        self.env.get_template("embed.html")?.render(context! {
            title => session.view.title,
            session_id => session.session_id.to_string(),
            state => Value::from_safe_string(script_json(session)?),
        })
    }

    pub fn error(&self, message: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template("error.html")?
            .render(context! { message => message })
    }

    pub fn help(&self, doc: &HelpDocument) -> Result<String, minijinja::Error> {
        self.env.get_template("help.html")?.render(context! {
            toc => Value::from_safe_string(doc.toc_html()),
            fragment => Value::from_safe_string(doc.fragment.clone()),
        })
    }

    pub fn upload(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("upload.html")?.render(context! {})
    }
}

/// JSON safe to place inside a `<script>` element.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, minijinja::Error> {
    let json = serde_json::to_string(value).map_err(|e| {
        minijinja::Error::new(minijinja::ErrorKind::BadSerialization, e.to_string())
    })?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}
