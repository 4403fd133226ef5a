//! Server-side HTML rendering.
//!
//! Pages are assembled with `format!`; every value that originates from the
//! WHOIS API goes through [`escape`].

use axum::http::StatusCode;

use crate::models::{squad_name, CustomData, PersonView, Reaction, Squad};

/// Which listing the index page shows, used to highlight navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    All,
    Ascending,
    Descending,
    Squad(i64),
}

/// Append one line of markup.
fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="nl">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/styles/style.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn nav_link(out: &mut String, href: &str, label: &str, active: bool) {
    let class = if active { r#" class="active""# } else { "" };
    out.push_str(&format!(
        r#"<li><a href="{}"{}>{}</a></li>"#,
        href,
        class,
        escape(label)
    ));
}

fn navigation(squads: &[Squad], listing: Option<Listing>) -> String {
    let mut nav = String::from("<nav>\n<ul class=\"sort\">");
    nav_link(&mut nav, "/", "Everyone", listing == Some(Listing::All));
    nav_link(&mut nav, "/sort", "A-Z", listing == Some(Listing::Ascending));
    nav_link(&mut nav, "/sort-desc", "Z-A", listing == Some(Listing::Descending));
    nav.push_str("</ul>\n<ul class=\"squads\">");
    for squad in squads {
        nav_link(
            &mut nav,
            &format!("/squad/{}", squad.id),
            &squad.name,
            listing == Some(Listing::Squad(squad.id)),
        );
    }
    nav.push_str("</ul>\n</nav>\n");
    nav
}

/// The listing page shared by `/`, `/sort`, `/sort-desc` and `/squad/:id`.
pub fn index_page(persons: &[PersonView], squads: &[Squad], listing: Listing) -> String {
    let heading = match listing {
        Listing::Squad(id) => match squad_name(squads, id) {
            Some(name) => format!("Squad {}", name),
            None => format!("Squad {}", id),
        },
        _ => "Everyone".to_string(),
    };

    let mut body = format!("<header><h1>{}</h1></header>\n", escape(&heading));
    body.push_str(&navigation(squads, Some(listing)));
    body.push_str("<main>\n");

    if persons.is_empty() {
        body.push_str("<p class=\"empty\">Nobody here yet.</p>\n");
    } else {
        body.push_str("<ul class=\"persons\">\n");
        for view in persons {
            let person = &view.person;
            push_line(
                &mut body,
                &format!(
                    r#"<li><a href="/person/{id}"><img src="{avatar}" alt="" loading="lazy" width="120" height="120"><span>{name}</span></a></li>"#,
                    id = person.id,
                    avatar = escape(&view.avatar),
                    name = escape(&person.full_name()),
                ),
            );
        }
        body.push_str("</ul>\n");
    }

    body.push_str("</main>\n");
    layout(&heading, &body)
}

/// The detail page for a single person, including the reaction form.
pub fn person_page(view: &PersonView, squads: &[Squad]) -> String {
    let person = &view.person;
    let name = person.full_name();
    let custom = CustomData::decode(person.custom.as_ref());

    let mut body = format!("<header><h1>{}</h1></header>\n", escape(&name));
    body.push_str(&navigation(squads, None));
    body.push_str("<main class=\"person\">\n");
    push_line(
        &mut body,
        &format!(
            r#"<img src="{}" alt="{}" width="240" height="240">"#,
            escape(&view.avatar),
            escape(&name)
        ),
    );

    body.push_str("<dl>\n");
    if let Some(squad) = person.squad_id.and_then(|id| squad_name(squads, id)) {
        push_line(&mut body, &format!("<dt>Squad</dt><dd>{}</dd>", escape(squad)));
    }
    for (label, key) in [("Nickname", "nickname"), ("Bio", "bio")] {
        if let Some(value) = person.field(key) {
            push_line(&mut body, &format!("<dt>{}</dt><dd>{}</dd>", label, escape(value)));
        }
    }
    if let Some(handle) = person.field("github_handle") {
        push_line(
            &mut body,
            &format!(
                r#"<dt>GitHub</dt><dd><a href="https://github.com/{0}">{0}</a></dd>"#,
                escape(handle)
            ),
        );
    }
    if let Some(website) = person
        .field("website")
        .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
    {
        push_line(
            &mut body,
            &format!(
                r#"<dt>Website</dt><dd><a href="{0}">{0}</a></dd>"#,
                escape(website)
            ),
        );
    }
    body.push_str("</dl>\n");

    push_line(
        &mut body,
        &format!(
            r#"<form method="post" action="/detail/{}/SE-GL-emoji" class="reactions">"#,
            person.id
        ),
    );
    for reaction in Reaction::ALL {
        push_line(
            &mut body,
            &format!(
                r#"<button type="submit" name="emoji" value="{}">{} <span>{}</span></button>"#,
                reaction.form_value(),
                reaction.symbol(),
                custom.count(reaction)
            ),
        );
    }
    body.push_str("</form>\n</main>\n");

    layout(&name, &body)
}

/// Generic error page; never includes internal details.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        "<header><h1>{}</h1></header>\n<main><p>{}</p><p><a href=\"/\">Back to everyone</a></p></main>\n",
        escape(&title),
        escape(message)
    );
    layout(&title, &body)
}
