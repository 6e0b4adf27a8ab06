use axum::response::Html;
use std::path::Path;
use tera::{Context, Tera};

use crate::error::AppError;

/// Loads every `*.html` under `dir`, with autoescaping on.
pub fn load(dir: &Path) -> Result<Tera, tera::Error> {
    let pattern = dir.join("**").join("*.html");
    let mut tera = Tera::new(&pattern.to_string_lossy())?;
    tera.autoescape_on(vec![".html"]);
    tracing::debug!(
        templates = tera.get_template_names().count(),
        "templates loaded from {}",
        dir.display()
    );
    Ok(tera)
}

pub fn render(tera: &Tera, name: &str, ctx: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(tera.render(name, ctx)?))
}
