// src/templates/not_found.rs
use super::{html_escape, render_page};
use crate::error::SiteError;
use crate::models::{ContentEntry, Locale};
use crate::services::renderer::prepend_locale;

pub fn render(locale: Locale, chrome: &ContentEntry, content: &ContentEntry) -> Result<String, SiteError> {
    let home = prepend_locale("/", locale)?;
    let title = content.text_or("title", "404");

    let body = format!(
        r#"
    <div class="not-found">
        <h1>{}</h1>
        <p class="muted">{}</p>
        <a href="{}" class="btn btn-primary">{}</a>
    </div>"#,
        html_escape(title),
        html_escape(content.text_or("subtitle", "")),
        html_escape(&home),
        html_escape(content.text_or("back", "Home"))
    );

    render_page(
        locale,
        chrome,
        title,
        &body,
        &home,
        &prepend_locale("/", locale.other())?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{LAYOUT_PAGE, NOT_FOUND_PAGE};
    use crate::services::catalog::ContentCatalog;

    #[test]
    fn test_not_found_is_localized() {
        let catalog = ContentCatalog::builtin().unwrap();
        let html = render(
            Locale::Zh,
            catalog.lookup(LAYOUT_PAGE, Locale::Zh).unwrap(),
            catalog.lookup(NOT_FOUND_PAGE, Locale::Zh).unwrap(),
        )
        .unwrap();
        assert!(html.contains("页面不存在。"));
        assert!(html.contains(r#"<a href="/zh" class="btn btn-primary">返回首页</a>"#));
    }
}
