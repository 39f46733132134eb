//! Page templates, embedded in the binary and rendered with Tera.

use tera::{Context, Tera};

use blogly_shared::ErrorPage;

const PAGES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("users/list.html", include_str!("../templates/users/list.html")),
    ("users/new.html", include_str!("../templates/users/new.html")),
    ("users/detail.html", include_str!("../templates/users/detail.html")),
    ("users/edit.html", include_str!("../templates/users/edit.html")),
    ("posts/list.html", include_str!("../templates/posts/list.html")),
    ("posts/new.html", include_str!("../templates/posts/new.html")),
    ("posts/detail.html", include_str!("../templates/posts/detail.html")),
    ("posts/edit.html", include_str!("../templates/posts/edit.html")),
    ("tags/list.html", include_str!("../templates/tags/list.html")),
    ("tags/new.html", include_str!("../templates/tags/new.html")),
    ("tags/detail.html", include_str!("../templates/tags/detail.html")),
    ("tags/edit.html", include_str!("../templates/tags/edit.html")),
];

const ERROR_PAGE: &str = include_str!("../templates/error.html");

/// The compiled page templates. HTML output is auto-escaped.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(PAGES.iter().copied())?;
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}

/// Render the standalone error page.
///
/// Error responses are built without access to the application state,
/// so this page does not extend the base layout.
pub fn render_error_page(page: &ErrorPage) -> String {
    let rendered = Context::from_serialize(page)
        .and_then(|context| Tera::one_off(ERROR_PAGE, &context, true));

    match rendered {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to render error page: {:?}", e);
            format!("{} {}", page.status, page.title)
        }
    }
}
