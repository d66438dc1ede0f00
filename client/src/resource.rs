use core::fmt;

use url::Url;

const SEP: char = '/';

/// Incrementally built request URL. Appended segments are escaped as path
/// segments, so raw file names can be passed as-is.
#[derive(Clone)]
pub struct Resource {
    url: Url,
}

impl Resource {
    #[must_use]
    pub fn new(uri: &str) -> Option<Resource> {
        let base = Url::parse(uri).ok()?;
        if base.cannot_be_a_base() {
            return None;
        }
        Some(Resource { url: base })
    }

    pub fn append_path(&mut self, path: &str) -> &mut Self {
        let trailing_slash = path.ends_with(SEP);
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty();
            for part in path.split(SEP).filter(|p| !p.is_empty()) {
                segments.push(part);
            }
            if trailing_slash {
                segments.push("");
            }
        }
        self
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
