use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Offset pagination for list calls.
///
/// `limit` is always sent; `0` asks the API for every object. `offset` is a
/// zero-based index and is left off the query when it is `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
}

impl ListOptions {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Query parameters in wire order.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if self.offset != 0 {
            params.push(("offset", self.offset.to_string()));
        }
        params
    }
}

/// Append list options to a relative path such as `"servers/"`.
///
/// Existing query parameters (e.g. `?do=clone`) are kept.
pub(crate) fn with_list_options(path: &str, opts: Option<&ListOptions>) -> String {
    let Some(opts) = opts else {
        return path.to_owned();
    };

    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in opts.to_query_params() {
        query.append_pair(key, &value);
    }
    let query = query.finish();

    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{query}")
}

/// Characters escaped in an identifier placed into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode an identifier so it stays a single path segment.
pub(crate) fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

/// Relative path of an action, e.g. `drives/{uuid}/action/?do=resize`.
pub(crate) fn action_path(resource: &str, uuid: &str, verb: &str) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("do", verb);
    format!("{resource}{}/action/?{}", path_segment(uuid), query.finish())
}
