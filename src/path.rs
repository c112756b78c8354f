//! Route path translation between the router's `:name` syntax and the
//! document's `{name}` syntax.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api_doc::DocError;
use crate::parameter::ParameterLocation;
use crate::swagger;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^/{}]+)\}|:([^/]+)").expect("path placeholder regex should be valid")
});

fn reject_wildcard(path: &str) -> Result<(), DocError> {
    if path.contains('*') {
        Err(DocError::WildcardPath {
            path: path.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Convert `:name` placeholders to `{name}`.
///
/// A placeholder runs until the next `/`. Paths already in `{name}` form are
/// returned unchanged.
///
/// # Example
///
/// ```rust
/// use restdoc::path::to_doc_path;
///
/// assert_eq!(to_doc_path("/cmd/:tool/:sub").unwrap(), "/cmd/{tool}/{sub}");
/// assert!(to_doc_path("/src/*filepath").is_err());
/// ```
pub fn to_doc_path(path: &str) -> Result<String, DocError> {
    reject_wildcard(path)?;
    let mut out = String::with_capacity(path.len() + 4);
    let mut in_param = false;
    for c in path.chars() {
        match c {
            ':' => {
                out.push('{');
                in_param = true;
            }
            '/' if in_param => {
                out.push_str("}/");
                in_param = false;
            }
            other => out.push(other),
        }
    }
    if in_param {
        out.push('}');
    }
    Ok(out)
}

/// Convert `{name}` placeholders to `:name`.
pub fn to_route_path(path: &str) -> Result<String, DocError> {
    reject_wildcard(path)?;
    let mut out = String::with_capacity(path.len());
    let mut in_param = false;
    for c in path.chars() {
        match c {
            '{' => {
                out.push(':');
                in_param = true;
            }
            '}' if in_param => in_param = false,
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Placeholder names in order of appearance, in either syntax.
#[must_use]
pub fn path_parameters(path: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(path)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Require every placeholder of `path` to have a path parameter in
/// `parameters`, and every path parameter to have a placeholder.
pub fn check_parameters_in_path(
    path: &str,
    parameters: &[swagger::Parameter],
) -> Result<(), DocError> {
    let in_path = path_parameters(path);
    let declared: Vec<&str> = parameters
        .iter()
        .filter(|p| p.location == Some(ParameterLocation::Path))
        .map(|p| p.name.as_str())
        .collect();

    let missing_in_doc: Vec<String> = in_path
        .iter()
        .filter(|name| !declared.contains(&name.as_str()))
        .cloned()
        .collect();
    if !missing_in_doc.is_empty() {
        return Err(DocError::MissingInDoc(missing_in_doc));
    }

    let missing_in_path: Vec<String> = declared
        .iter()
        .filter(|name| !in_path.iter().any(|p| p == *name))
        .map(|name| (*name).to_string())
        .collect();
    if !missing_in_path.is_empty() {
        return Err(DocError::MissingInPath(missing_in_path));
    }
    Ok(())
}

/// First static segment of `path`, used as the default operation tag.
///
/// Returns an empty string when the path does not start with `/` or its first
/// segment begins with a placeholder.
#[must_use]
pub fn tag_from_path(path: &str) -> String {
    let Some(rest) = path.strip_prefix('/') else {
        return String::new();
    };
    rest.chars()
        .take_while(|c| !matches!(c, '/' | ':' | '{'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_info::{ValueInfo, ValueKind};

    #[test]
    fn test_route_and_doc_paths_round_trip() {
        let cases = [
            ("/cmd/:tool/:sub", "/cmd/{tool}/{sub}"),
            ("/user_:name/about", "/user_{name}/about"),
            ("/info/:user/project/:project", "/info/{user}/project/{project}"),
            ("/books", "/books"),
            ("/", "/"),
        ];
        for (route, doc) in cases {
            assert_eq!(to_doc_path(route).unwrap(), doc);
            assert_eq!(to_route_path(doc).unwrap(), route);
            assert_eq!(to_route_path(&to_doc_path(route).unwrap()).unwrap(), route);
            assert_eq!(to_doc_path(&to_route_path(doc).unwrap()).unwrap(), doc);
        }
    }

    #[test]
    fn test_doc_path_passes_through() {
        assert_eq!(to_doc_path("/books/{id}").unwrap(), "/books/{id}");
        assert_eq!(to_route_path("/books/:id").unwrap(), "/books/:id");
    }

    #[test]
    fn test_wildcards_rejected() {
        for path in ["/src/*filepath", "/usr/:id/*key"] {
            assert!(matches!(to_doc_path(path), Err(DocError::WildcardPath { .. })));
            assert!(to_route_path(path).is_err());
        }
    }

    #[test]
    fn test_path_parameters_both_syntaxes() {
        assert_eq!(path_parameters("/cmd/:tool/:sub"), vec!["tool", "sub"]);
        assert_eq!(path_parameters("/user_{name}/about"), vec!["name"]);
        assert!(path_parameters("/books").is_empty());
    }

    #[test]
    fn test_tag_from_path() {
        let cases = [
            ("/api/books", "api"),
            ("/books", "books"),
            ("/books{id}", "books"),
            ("/user:id", "user"),
            ("/:id/x", ""),
            ("books", ""),
            ("", ""),
        ];
        for (path, tag) in cases {
            assert_eq!(tag_from_path(path), tag, "tag of {path}");
        }
    }

    fn path_param(name: &str) -> swagger::Parameter {
        ValueInfo::new(ValueKind::String)
            .to_swagger_parameter(name, ParameterLocation::Path)
            .unwrap()
    }

    #[test]
    fn test_check_parameters_in_path() {
        assert!(check_parameters_in_path("/books/{id}", &[path_param("id")]).is_ok());

        let err = check_parameters_in_path("/books/{id}", &[]).unwrap_err();
        assert_eq!(err, DocError::MissingInDoc(vec!["id".to_string()]));
        assert_eq!(err.to_string(), "missing parameters id in the api doc");

        let err = check_parameters_in_path("/books", &[path_param("id")]).unwrap_err();
        assert_eq!(err, DocError::MissingInPath(vec!["id".to_string()]));
    }
}
