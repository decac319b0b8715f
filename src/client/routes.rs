//! View-routing table - maps browser paths to a (template, view) pair.

/// Template a view renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Home,
    VideoForm,
    VideoDelete,
}

impl Template {
    pub fn path(&self) -> &'static str {
        match self {
            Template::Home => "partials/home.html",
            Template::VideoForm => "partials/video-form.html",
            Template::VideoDelete => "partials/video-delete.html",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    List,
    Add,
    Edit,
    Delete,
}

/// A resolved view with its path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Add,
    Edit { id: String },
    Delete { id: String },
}

pub struct RouteDef {
    pub pattern: &'static str,
    pub template: Template,
    pub kind: ViewKind,
}

/// Path any unmatched location redirects to.
pub const FALLBACK: &str = "/";

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        pattern: "/",
        template: Template::Home,
        kind: ViewKind::List,
    },
    RouteDef {
        pattern: "/add-video",
        template: Template::VideoForm,
        kind: ViewKind::Add,
    },
    RouteDef {
        pattern: "/video/:id",
        template: Template::VideoForm,
        kind: ViewKind::Edit,
    },
    RouteDef {
        pattern: "/video/delete/:id",
        template: Template::VideoDelete,
        kind: ViewKind::Delete,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    View { view: View, template: Template },
    Redirect(&'static str),
}

/// Resolve `path` against [`ROUTES`]. Query string and fragment are ignored.
pub fn resolve(path: &str) -> Resolution {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    for route in ROUTES {
        if let Some(id) = match_pattern(route.pattern, &segments) {
            let view = match (route.kind, id) {
                (ViewKind::List, _) => View::List,
                (ViewKind::Add, _) => View::Add,
                (ViewKind::Edit, Some(id)) => View::Edit { id },
                (ViewKind::Delete, Some(id)) => View::Delete { id },
                _ => continue,
            };
            return Resolution::View {
                view,
                template: route.template,
            };
        }
    }

    Resolution::Redirect(FALLBACK)
}

/// Match path segments against a pattern. Returns `Some(param)` on a match,
/// where `param` is the `:id` segment if the pattern has one.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Option<String>> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut param = None;
    for (part, segment) in parts.iter().zip(segments) {
        if part.starts_with(':') {
            param = Some(segment.to_string());
        } else if part != segment {
            return None;
        }
    }
    Some(param)
}
