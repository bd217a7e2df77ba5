//! Route labels for spans and metrics.

/// Collapse identifiers in a request path so labels stay low-cardinality,
/// e.g. `/api/cart/s-91/update/7` becomes `/api/cart/{session}/update/{id}`.
pub(super) fn route_label(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_owned();
    }

    let mut label = String::new();
    let mut previous = "";

    for segment in trimmed.split('/') {
        label.push('/');

        let placeholder = match previous {
            "cart" => Some("{session}"),
            "categories" => Some("{category}"),
            _ if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) => {
                Some("{id}")
            }
            _ => None,
        };

        label.push_str(placeholder.unwrap_or(segment));
        previous = segment;
    }

    label
}
