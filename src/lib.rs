//! # jsonresolve
//!
//! A Rust library for walking parsed JSON documents with simple dotted paths, and for
//! finding typed resources in declarative resource manifests (e.g. infrastructure templates).
//!
//! Analysis rules over such documents mostly ask two questions: "what is at
//! `properties.siteConfig.minTlsVersion`?" and "which entries in `resources` are of type
//! `Microsoft.Web/sites`?". This library answers both and always tells you *where* it
//! looked, so a missing setting can be reported by its full path.
//!
//! ## Features
//!
//! - **Case-insensitive navigation:** `a.b.c` finds `{"A": {"B": {"C": ...}}}`, and the
//!   reported path uses the document's own spelling (`A.B.C`).
//! - **Misses are values, not errors:** a path that does not exist resolves to a result with
//!   no node, whose path still names the location that was asked for.
//! - **Resource-type queries:** elements of a `resources` array are matched by their exact
//!   `type` and reported at their indexed path (`resources[2]`).
//! - **Memoization:** every resolver caches its answers, so repeated queries are free.
//! - **Paths you can reuse:** produced paths parse back into `PathToken`s and convert to
//!   JSON Pointers.
//!
//! ## Examples
//!
//! ### Basic usage:
//!
//! ```rust
//! use jsonresolve::PathResolver;
//! use serde_json::json;
//!
//! let template = json!({
//!     "resources": [
//!         {
//!             "type": "Microsoft.Web/sites",
//!             "properties": { "httpsOnly": true }
//!         }
//!     ]
//! });
//!
//! let root = PathResolver::new(&template, "");
//!
//! for site in root.resolve_resource_type("Microsoft.Web/sites").iter() {
//!     let https = &site.resolve("Properties.HttpsOnly")[0];
//!     assert_eq!(https.path(), "resources[0].properties.httpsOnly");
//!     assert_eq!(https.node(), Some(&json!(true)));
//!
//!     let tls = &site.resolve("properties.siteConfig.minTlsVersion")[0];
//!     assert!(!tls.exists());
//!     assert_eq!(tls.path(), "resources[0].properties.siteConfig.minTlsVersion");
//! }
//! ```
//!
//! ### Specifying the separator
//!
//! ```rust
//! use jsonresolve::{PathResolver, Separator};
//! use serde_json::json;
//!
//! let doc = json!({"foo": {"bar": 1}});
//! let root = PathResolver::new(&doc, "").with_separator(Separator::Slash);
//!
//! assert_eq!(root.resolve("foo/bar")[0].path(), "foo.bar");
//! ```
//!
//! ### Working with resolved paths
//!
//! ```rust
//! use jsonresolve::{parse_path, PathToken};
//!
//! let tokens = parse_path("resources[1].tags['cost center']").unwrap();
//! assert_eq!(tokens, vec![
//!     PathToken::Key("resources".to_string()),
//!     PathToken::Index(1),
//!     PathToken::Key("tags".to_string()),
//!     PathToken::Key("cost center".to_string()),
//! ]);
//! ```
//!
//! ## Logging
//!
//! Cache hits and navigation misses are logged at `trace` level through the `log` facade.
//! Install any `log` implementation to see them.
//!
//! ## License
//!
//! See the [LICENSE](LICENSE) file for details.

mod lookup;
mod path;
mod resolver;
mod types;

pub use lookup::{find_property, resources_of_type, RESOURCES_PROPERTY, TYPE_PROPERTY};
pub use path::{append_token, parse_path, render_path};
pub use resolver::PathResolver;
pub use types::{PathToken, ResolverError, Separator};
