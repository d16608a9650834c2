//! Navigation targets and the navigator capability.
//!
//! The search controller hands a raw committed value to a [`Navigator`]. Turning
//! that value into a route (including percent-encoding it) happens here, not in
//! the controller.

use reqwest::Url;
use std::fmt;
use tokio::sync::mpsc;

/// Synthetic origin used only to borrow `Url`'s path-segment encoding.
const ROUTE_ORIGIN: &str = "hnsearch://local/";

/// A view the front-end can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Trending stories.
    FrontPage,
    /// Stories for a category keyword such as `ask` or `show`.
    Category {
        /// Category name, lowercased for the path.
        name: String,
    },
    /// Keyword search results.
    Search {
        /// Raw committed keyword.
        keyword: String,
    },
    /// One item with its comment thread.
    Item {
        /// Algolia object id.
        id: String,
    },
}

impl Route {
    /// Route for a committed search value.
    #[must_use]
    pub fn search(keyword: impl Into<String>) -> Self {
        Self::Search {
            keyword: keyword.into(),
        }
    }

    /// Path form of the route with each dynamic segment percent-encoded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hnsearch::runtime::Route;
    ///
    /// assert_eq!(Route::search("rust lang/async").to_path(), "/search/rust%20lang%2Fasync");
    /// assert_eq!(Route::FrontPage.to_path(), "/");
    /// ```
    #[must_use]
    pub fn to_path(&self) -> String {
        let Ok(mut url) = Url::parse(ROUTE_ORIGIN) else {
            return "/".to_string();
        };

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear();
            match self {
                Self::FrontPage => {}
                Self::Category { name } => {
                    segments.push(&name.to_lowercase());
                }
                Self::Search { keyword } => {
                    segments.push("search").push(keyword);
                }
                Self::Item { id } => {
                    segments.push("item").push(id);
                }
            }
        }

        url.path().to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// Receives committed values and moves the user to the matching results view.
///
/// Navigation is assumed to always succeed eventually; failures inside the
/// target view are that view's concern.
pub trait Navigator: Send {
    /// Transitions to the results view for `value`.
    fn navigate(&mut self, value: &str);
}

/// Forwards search routes over a channel to whoever owns the screen.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    /// Creates a navigator and the receiving end of its route stream.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&mut self, value: &str) {
        let route = Route::search(value);
        tracing::debug!(route = %route, "navigating");
        if self.tx.send(route).is_err() {
            tracing::debug!("route receiver dropped, navigation ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_encode_dynamic_segments() {
        assert_eq!(Route::search("c++ & rust").to_path(), "/search/c++%20&%20rust");
        assert_eq!(Route::search("100%").to_path(), "/search/100%25");
        assert_eq!(
            Route::Category { name: "Ask".into() }.to_path(),
            "/ask"
        );
        assert_eq!(Route::Item { id: "8863".into() }.to_path(), "/item/8863");
    }

    #[test]
    fn channel_navigator_emits_search_routes() {
        let (mut navigator, mut rx) = ChannelNavigator::new();
        navigator.navigate("rust");

        assert_eq!(rx.try_recv().unwrap(), Route::search("rust"));
    }
}
