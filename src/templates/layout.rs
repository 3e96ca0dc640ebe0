// src/templates/layout.rs
use super::html_escape;
use crate::error::SiteError;
use crate::models::{ContentEntry, Locale};
use crate::pages;
use crate::services::clipboard::COPY_ACK_DURATION;
use crate::services::renderer::prepend_locale;

/// Browser side of the copy buttons. Any button with `data-copy` writes its
/// value to the clipboard and shows `data-done` for the acknowledgment
/// window. Without clipboard access nothing happens.
const COPY_SCRIPT: &str = r#"(function () {
  var ackMs = __ACK_MS__;
  document.querySelectorAll("button[data-copy]").forEach(function (btn) {
    btn.addEventListener("click", function () {
      if (!navigator.clipboard || !navigator.clipboard.writeText) return;
      navigator.clipboard.writeText(btn.dataset.copy).then(function () {
        btn.textContent = btn.dataset.done;
        clearTimeout(btn._ackTimer);
        btn._ackTimer = setTimeout(function () {
          btn.textContent = btn.dataset.label;
        }, ackMs);
      }, function () {});
    });
  });
})();"#;

/// Wrap page content in the shared chrome: brand, navigation, language
/// toggle, footer and the copy script.
///
/// `current_href` and `alternate_href` are the same page in `locale` and in
/// the other locale.
pub fn render_page(
    locale: Locale,
    chrome: &ContentEntry,
    title: &str,
    content: &str,
    current_href: &str,
    alternate_href: &str,
) -> Result<String, SiteError> {
    let home_href = prepend_locale("/", locale)?;

    let mut nav = String::new();
    for page_id in chrome.keys_with_prefix("nav.") {
        let def = pages::find(page_id).ok_or_else(|| SiteError::UnknownPage(page_id.to_string()))?;
        let label = chrome.text(&format!("nav.{}", page_id)).unwrap_or(page_id);
        let href = prepend_locale(def.path, locale)?;
        nav.push_str(&nav_link(&href, label, href == current_href));
    }

    let (en_href, zh_href) = match locale {
        Locale::En => (current_href, alternate_href),
        Locale::Zh => (alternate_href, current_href),
    };
    let toggle = format!(
        r#"<div class="lang-toggle" aria-label="{}">
                    <a href="{}" hreflang="en" class="{}">EN</a>
                    <a href="{}" hreflang="zh-CN" class="{}">中文</a>
                </div>"#,
        html_escape(chrome.text_or("language", "Language")),
        html_escape(en_href),
        if locale == Locale::En { "active" } else { "" },
        html_escape(zh_href),
        if locale == Locale::Zh { "active" } else { "" },
    );

    let brand = chrome.text_or("brand.name", "WAOC");
    let script = COPY_SCRIPT.replace("__ACK_MS__", &COPY_ACK_DURATION.as_millis().to_string());

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - {brand}</title>
    <link rel="alternate" hreflang="{alt_lang}" href="{alternate}">
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
    <header class="header">
        <div class="container">
            <div class="header-content">
                <a href="{home}" class="logo">
                    <span class="logo-mark">{brand}</span>
                    <span class="logo-tagline">{tagline}</span>
                </a>
                <nav class="nav">
                    {nav}
                </nav>
                {toggle}
            </div>
        </div>
    </header>

    <main class="main">
        <div class="container">
            {content}
        </div>
    </main>

    <footer class="footer">
        <div class="container footer-content">
            <p>{footer_left}</p>
            <p class="muted">{footer_right}</p>
        </div>
    </footer>
    <script>{script}</script>
</body>
</html>"#,
        lang = locale.html_lang(),
        title = html_escape(title),
        brand = html_escape(brand),
        alt_lang = locale.other().html_lang(),
        alternate = html_escape(alternate_href),
        home = html_escape(&home_href),
        tagline = html_escape(chrome.text_or("brand.tagline", "")),
        nav = nav,
        toggle = toggle,
        content = content,
        footer_left = html_escape(chrome.text_or("footer.left", "")),
        footer_right = html_escape(chrome.text_or("footer.right", "")),
        script = script,
    ))
}

pub fn nav_link(href: &str, text: &str, active: bool) -> String {
    let class = if active { "nav-link active" } else { "nav-link" };
    format!(
        r#"<a href="{}" class="{}">{}</a>"#,
        html_escape(href),
        class,
        html_escape(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::ContentCatalog;

    #[test]
    fn test_chrome_is_localized() {
        let catalog = ContentCatalog::builtin().unwrap();
        let chrome = catalog.lookup(pages::LAYOUT_PAGE, Locale::Zh).unwrap();
        let html = render_page(Locale::Zh, chrome, "核验", "<p>body</p>", "/zh/verify", "/en/verify").unwrap();

        assert!(html.contains(r#"<html lang="zh-CN">"#));
        assert!(html.contains(r#"<a href="/zh/verify" class="nav-link active">核验</a>"#));
        assert!(html.contains(r#"<a href="/zh/docs" class="nav-link">文档</a>"#));
        assert!(html.contains(r#"<a href="/en/verify" hreflang="en" class="">EN</a>"#));
        assert!(html.contains("本站内容不构成任何投资建议。"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_copy_script_uses_ack_window() {
        let catalog = ContentCatalog::builtin().unwrap();
        let chrome = catalog.lookup(pages::LAYOUT_PAGE, Locale::En).unwrap();
        let html = render_page(Locale::En, chrome, "Home", "", "/en", "/zh").unwrap();
        assert!(html.contains("var ackMs = 1200;"));
        assert!(!html.contains("__ACK_MS__"));
    }
}
