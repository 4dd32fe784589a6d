//! Server-side rendered pages.
//!
//! Templates are embedded at compile time so the binary is self-contained.

use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment, Error};

pub const HOUSES_INDEX: &str = "houses/index.html";
pub const HOUSES_SHOW: &str = "houses/show.html";
pub const ERROR_PAGE: &str = "errors/error.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    (HOUSES_INDEX, include_str!("../../templates/houses/index.html")),
    (HOUSES_SHOW, include_str!("../../templates/houses/show.html")),
    (ERROR_PAGE, include_str!("../../templates/errors/error.html")),
];

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();

    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });

    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Failed to load template {name}, {e}");
        }
    }

    env
});

pub fn render_template<T: serde::Serialize>(name: &str, ctx: T) -> Result<String, Error> {
    let tpl = ENV.get_template(name)?;
    tpl.render(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_template_loads() {
        for (name, _) in TEMPLATES {
            assert!(ENV.get_template(name).is_ok(), "{name} failed to load");
        }
    }

    #[test]
    fn error_page_escapes_message() {
        let html = render_template(
            ERROR_PAGE,
            json!({"status": 404, "reason": "Not Found", "message": "<script>"}),
        )
        .unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        assert!(render_template("houses/missing.html", json!({})).is_err());
    }
}
