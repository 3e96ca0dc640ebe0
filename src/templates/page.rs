// src/templates/page.rs
use super::{html_escape, render_page};
use crate::error::SiteError;
use crate::models::{ContentEntry, LinkKind, NavAction, Notice, RenderedLink, RenderedPage, Section};

/// Full HTML document for a rendered page.
pub fn render(page: &RenderedPage, chrome: &ContentEntry) -> Result<String, SiteError> {
    let mut content = String::new();

    content.push_str(&hero(page));

    if let Some(notice) = &page.notice {
        content.push_str(&notice_box("notice", notice));
    }

    if !page.toc.is_empty() {
        let items: String = page
            .toc
            .iter()
            .map(|entry| {
                format!(
                    r##"<li><a href="#{}">{}</a></li>"##,
                    html_escape(&entry.id),
                    html_escape(&entry.label)
                )
            })
            .collect();
        content.push_str(&format!(
            r#"
    <nav class="toc">
        <div class="toc-title">{}</div>
        <ol>{}</ol>
    </nav>"#,
            html_escape(chrome.text_or("contents", "Contents")),
            items
        ));
    }

    for section in &page.sections {
        content.push_str(&section_block(section, chrome));
    }

    for block in &page.link_groups {
        let heading = match &block.title {
            Some(title) => format!("<h2>{}</h2>", html_escape(title)),
            None => String::new(),
        };
        let subtitle = match &block.subtitle {
            Some(subtitle) => format!(r#"<p class="muted">{}</p>"#, html_escape(subtitle)),
            None => String::new(),
        };
        let cards: String = block.links.iter().map(|link| link_card(link, chrome)).collect();
        content.push_str(&format!(
            r#"
    <div class="section link-group" id="group-{}">
        {}
        {}
        <div class="card-grid">{}</div>
    </div>"#,
            block.group.as_str(),
            heading,
            subtitle,
            cards
        ));
    }

    render_page(
        page.locale,
        chrome,
        &page.title,
        &content,
        &page.path,
        &page.alternate_href,
    )
}

fn hero(page: &RenderedPage) -> String {
    let badges: String = page
        .badges
        .iter()
        .map(|b| format!(r#"<span class="badge">{}</span>"#, html_escape(b)))
        .collect();
    let kicker = page
        .kicker
        .as_ref()
        .map(|k| format!(r#"<p class="kicker">{}</p>"#, html_escape(k)))
        .unwrap_or_default();
    let subtitle = page
        .subtitle
        .as_ref()
        .map(|s| format!(r#"<p class="hero-subtitle">{}</p>"#, html_escape(s)))
        .unwrap_or_default();
    let actions: String = page
        .actions
        .iter()
        .enumerate()
        .map(|(i, action)| action_link(action, if i == 0 { "btn btn-primary" } else { "btn btn-secondary" }))
        .collect();

    format!(
        r#"
    <div class="hero">
        <div class="badges">{}</div>
        {}
        <h1 class="hero-title">{}</h1>
        {}
        <div class="cta-buttons">{}</div>
    </div>"#,
        badges,
        kicker,
        html_escape(&page.title),
        subtitle,
        actions
    )
}

fn notice_box(class: &str, notice: &Notice) -> String {
    format!(
        r#"
    <div class="{}">
        <strong>{}</strong>
        <p>{}</p>
    </div>"#,
        class,
        html_escape(&notice.title),
        html_escape(&notice.text)
    )
}

fn action_link(action: &NavAction, class: &str) -> String {
    format!(
        r#"<a href="{}" class="{}">{}</a>"#,
        html_escape(&action.href),
        class,
        html_escape(&action.label)
    )
}

fn section_block(section: &Section, chrome: &ContentEntry) -> String {
    let mut body = String::new();

    if let Some(title) = &section.title {
        body.push_str(&format!("<h2>{}</h2>", html_escape(title)));
    }
    if let Some(subtitle) = &section.subtitle {
        let tag = if section.title.is_some() { "p class=\"muted\"" } else { "h3" };
        let close = if section.title.is_some() { "p" } else { "h3" };
        body.push_str(&format!("<{}>{}</{}>", tag, html_escape(subtitle), close));
    }
    for paragraph in &section.paragraphs {
        body.push_str(&format!("<p>{}</p>", html_escape(paragraph)));
    }
    if !section.bullets.is_empty() {
        body.push_str(&list("ul", &section.bullets));
    }
    if !section.steps.is_empty() {
        body.push_str(&list("ol", &section.steps));
    }
    if let Some(callout) = &section.callout {
        body.push_str(&notice_box("callout", callout));
    }
    if let Some(external) = &section.external {
        body.push_str(&link_card(external, chrome));
    }
    if let Some(link) = &section.link {
        body.push_str(&action_link(link, "btn btn-secondary"));
    }

    format!(
        r#"
    <section class="section" id="{}">
        {}
    </section>"#,
        html_escape(&section.id),
        body
    )
}

fn list(tag: &str, items: &[String]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", html_escape(item)))
        .collect();
    format!("<{tag}>{items}</{tag}>")
}

/// One registry entry. Addresses get a monospace value, an explorer link
/// and a copy button; placeholders render as muted text only.
fn link_card(link: &RenderedLink, chrome: &ContentEntry) -> String {
    let tag = link
        .tag
        .as_ref()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, html_escape(t)))
        .unwrap_or_default();
    let desc = link
        .desc
        .as_ref()
        .map(|d| format!("<p>{}</p>", html_escape(d)))
        .unwrap_or_default();
    let warn = link
        .warn
        .as_ref()
        .map(|w| format!(r#"<p class="warn">{}</p>"#, html_escape(w)))
        .unwrap_or_default();

    let value_class = if link.kind == LinkKind::Address { "value mono" } else { "value" };
    let value = match &link.href {
        None => format!(
            r#"<span class="value muted" title="{}">{}</span>"#,
            html_escape(chrome.text_or("unavailable", "")),
            html_escape(&link.value)
        ),
        Some(href) if link.kind == LinkKind::Url => format!(
            r#"<a href="{}" class="{}" target="_blank" rel="noreferrer">{}</a>"#,
            html_escape(href),
            value_class,
            html_escape(&link.value)
        ),
        Some(_) => format!(
            r#"<code class="{}">{}</code>"#,
            value_class,
            html_escape(&link.value)
        ),
    };

    let open = match &link.href {
        Some(href) => format!(
            r#"<a href="{}" class="btn btn-small" target="_blank" rel="noreferrer">{} <span aria-hidden="true">↗</span></a>"#,
            html_escape(href),
            html_escape(link.cta.as_deref().unwrap_or(chrome.text_or("open", "Open")))
        ),
        None => String::new(),
    };

    let copy = match &link.copy {
        Some(text) => {
            let label = chrome.text_or("copy.label", "Copy");
            format!(
                r#"<button type="button" class="btn btn-small btn-copy" data-copy="{}" data-label="{}" data-done="{}">{}</button>"#,
                html_escape(text),
                html_escape(label),
                html_escape(chrome.text_or("copy.done", "Copied")),
                html_escape(label)
            )
        }
        None => String::new(),
    };

    format!(
        r#"
        <div class="card link-card" id="link-{}">
            <div class="card-head"><span class="label">{}</span>{}</div>
            {}
            {}
            {}
            <div class="card-actions">{}{}</div>
        </div>"#,
        html_escape(&link.id),
        html_escape(&link.label),
        tag,
        desc,
        value,
        warn,
        open,
        copy
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;
    use crate::pages;
    use crate::services::{catalog::ContentCatalog, links::LinkRegistry, renderer::PageRenderer};
    use std::sync::Arc;

    fn render_html(page_id: &str, locale: Locale) -> String {
        let renderer = PageRenderer::new(
            Arc::new(LinkRegistry::official("https://one-mission.vercel.app").unwrap()),
            Arc::new(ContentCatalog::builtin().unwrap()),
        );
        let page = renderer.render_def(pages::find(page_id).unwrap(), locale).unwrap();
        render(&page, renderer.layout(locale).unwrap()).unwrap()
    }

    #[test]
    fn test_verify_html_in_chinese() {
        let html = render_html("verify", Locale::Zh);
        assert!(html.contains("安全提示"));
        assert!(html.contains(r#"data-copy="82gi7mybA1yHi56FcCC9wvTPzew5hsxP2wdHv4nYpump""#));
        assert!(html.contains(r#"data-done="已复制""#));
        assert!(html.contains(
            r#"href="https://solscan.io/token/82gi7mybA1yHi56FcCC9wvTPzew5hsxP2wdHv4nYpump""#
        ));
        assert!(html.contains(r#"<code class="value mono">0x4f0b6d521e3929b240e265fac2155d4341abede7</code>"#));
    }

    #[test]
    fn test_placeholder_renders_muted() {
        let html = render_html("verify", Locale::En);
        let card_start = html.find(r#"id="link-bscDex""#).unwrap();
        let card = &html[card_start..];
        let card = &card[..card.find("</div>\n        </div>").unwrap_or(card.len())];
        assert!(card.contains(r#"<span class="value muted""#));
        assert!(!card.contains("data-copy"));
        assert!(!card.contains("href="));
    }

    #[test]
    fn test_docs_toc_links_to_sections() {
        let html = render_html("docs", Locale::En);
        assert!(html.contains(r##"<a href="#overview">Overview</a>"##));
        assert!(html.contains(r#"<section class="section" id="overview">"#));
    }

    #[test]
    fn test_url_cards_open_externally() {
        let html = render_html("connect", Locale::En);
        assert!(html.contains(r#"href="https://t.me/WAOCGlobalCommunity" class="btn btn-small" target="_blank" rel="noreferrer">Join Telegram"#));
        assert!(!html.contains("btn-copy"));
    }
}
