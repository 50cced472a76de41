//! Markdown body compilation with syntax highlighting

use anyhow::{anyhow, Result};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::SiteConfig;
use crate::helpers::url_host;

/// Attributes added to links leaving the site
const EXTERNAL_LINK_ATTRS: &str = r#"target="_blank" rel="nofollow noopener noreferrer""#;

/// Parser extensions used for every body
const PARSER_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_FOOTNOTES)
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_SMART_PUNCTUATION)
    .union(Options::ENABLE_HEADING_ATTRIBUTES)
    .union(Options::ENABLE_GFM);

/// Compiles document bodies to HTML
pub struct MarkdownRenderer {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    theme: String,
    line_numbers: bool,
    external_links: Option<ExternalLinks>,
}

/// Which links count as external
#[derive(Debug, Clone)]
struct ExternalLinks {
    /// Hosts treated as internal: the site host plus configured exclusions
    internal_hosts: Vec<String>,
}

/// A fenced or indented code block being collected
struct CodeBlock {
    lang: Option<String>,
    source: String,
}

impl CodeBlock {
    fn open(kind: CodeBlockKind<'_>) -> Self {
        let lang = match kind {
            CodeBlockKind::Fenced(info) => info
                .split_whitespace()
                .next()
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            CodeBlockKind::Indented => None,
        };
        Self {
            lang,
            source: String::new(),
        }
    }
}

impl MarkdownRenderer {
    /// Renderer with the default theme and no link decoration
    pub fn new() -> Self {
        Self::with_highlight("base16-ocean.dark", false, None)
    }

    /// Renderer configured from `highlight` and `external_link`
    pub fn from_config(config: &SiteConfig) -> Self {
        let external_links = config.external_link.enable.then(|| {
            let mut internal_hosts: Vec<String> = config
                .external_link
                .exclude
                .iter()
                .map(|h| h.to_ascii_lowercase())
                .collect();
            internal_hosts.extend(url_host(&config.url));
            ExternalLinks { internal_hosts }
        });

        Self::with_highlight(
            &config.highlight.theme,
            config.highlight.line_number,
            external_links,
        )
    }

    fn with_highlight(theme: &str, line_numbers: bool, external_links: Option<ExternalLinks>) -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
            theme: theme.to_string(),
            line_numbers,
            external_links,
        }
    }

    /// Compile a markdown body to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let mut out: Vec<Event> = Vec::new();
        let mut block: Option<CodeBlock> = None;

        for event in Parser::new_ext(markdown, PARSER_OPTIONS) {
            if let Some(mut code) = block.take() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        let html = self.highlight_code(&code.source, code.lang.as_deref())?;
                        out.push(Event::Html(CowStr::from(html)));
                    }
                    Event::Text(text) => {
                        code.source.push_str(&text);
                        block = Some(code);
                    }
                    _ => block = Some(code),
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => block = Some(CodeBlock::open(kind)),
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) if self.is_external(&dest_url) => {
                    out.push(Event::InlineHtml(CowStr::from(external_anchor(&dest_url, &title))));
                }
                other => out.push(other),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, out.into_iter());
        Ok(html_output)
    }

    fn is_external(&self, url: &str) -> bool {
        let Some(rules) = &self.external_links else {
            return false;
        };
        url_host(url).is_some_and(|host| !rules.internal_hosts.contains(&host))
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String> {
        let lang = lang.unwrap_or("text");
        let syntax = self
            .syntaxes
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let theme = self
            .themes
            .themes
            .get(&self.theme)
            .or_else(|| self.themes.themes.values().next())
            .ok_or_else(|| anyhow!("no highlight themes available"))?;

        let highlighted = match highlighted_html_for_string(code, &self.syntaxes, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::debug!("Highlighting failed for {}: {}", lang, e);
                return Ok(format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang,
                    html_escape(code)
                ));
            }
        };

        if !self.line_numbers {
            return Ok(format!(
                r#"<figure class="highlight" data-language="{}">{}</figure>"#,
                lang, highlighted
            ));
        }

        let lines: Vec<&str> = highlighted.lines().collect();
        let gutter: Vec<String> = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect();
        Ok(format!(
            r#"<figure class="highlight" data-language="{}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang,
            gutter.join("\n"),
            lines.join("\n")
        ))
    }
}

/// Opening `<a>` tag for a link leaving the site
fn external_anchor(href: &str, title: &str) -> String {
    let mut anchor = format!(r#"<a href="{}""#, html_escape(href));
    if !title.is_empty() {
        anchor.push_str(&format!(r#" title="{}""#, html_escape(title)));
    }
    anchor.push(' ');
    anchor.push_str(EXTERNAL_LINK_ATTRS);
    anchor.push('>');
    anchor
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
