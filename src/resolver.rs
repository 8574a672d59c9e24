use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use jsonptr::{PointerBuf, Token};
use serde_json::Value;

use crate::lookup::{find_property, resources_of_type};
use crate::path::{append_token, parse_path};
use crate::types::{PathToken, ResolverError, Separator};

type Results<'a> = Rc<[PathResolver<'a>]>;

/// A position in a borrowed JSON document, plus the path that led there.
///
/// The node may be absent: resolving a path that does not exist yields a resolver with no
/// node whose path still names the location that was asked for.
///
/// Every query is memoized per instance. Asking the same resolver the same question twice
/// hands back the same shared result without walking the document again. Children start
/// with their own, empty caches.
pub struct PathResolver<'a> {
    node: Option<&'a Value>,
    path: String,
    separator: Separator,
    paths: RefCell<HashMap<String, Results<'a>>>,
    resource_types: RefCell<HashMap<String, Results<'a>>>,
}

impl<'a> PathResolver<'a> {
    /// Anchors a resolver at `node`, whose location in the document is `path`.
    ///
    /// For the document root, `path` is usually the empty string.
    pub fn new(node: &'a Value, path: impl Into<String>) -> Self {
        Self::anchored(Some(node), path.into(), Separator::default())
    }

    /// Like [`PathResolver::new`], for callers holding optional arguments.
    ///
    /// ## Returns
    ///
    /// `ResolverError::ArgumentRequired` naming the first missing argument, `node` before `path`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use jsonresolve::{PathResolver, ResolverError};
    ///
    /// let err = PathResolver::try_new(None, Some("")).unwrap_err();
    /// assert_eq!(err, ResolverError::ArgumentRequired { argument: "node" });
    /// ```
    pub fn try_new(node: Option<&'a Value>, path: Option<&str>) -> Result<Self, ResolverError> {
        let node = node.ok_or(ResolverError::ArgumentRequired { argument: "node" })?;
        let path = path.ok_or(ResolverError::ArgumentRequired { argument: "path" })?;
        Ok(Self::new(node, path))
    }

    /// Sets the separator `resolve` splits its input on. Children inherit it.
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    fn anchored(node: Option<&'a Value>, path: String, separator: Separator) -> Self {
        Self {
            node,
            path,
            separator,
            paths: RefCell::new(HashMap::new()),
            resource_types: RefCell::new(HashMap::new()),
        }
    }

    fn child(&self, node: Option<&'a Value>, path: String) -> Self {
        Self::anchored(node, path, self.separator)
    }

    /// The JSON value in focus, or `None` if nothing exists at [`PathResolver::path`].
    pub fn node(&self) -> Option<&'a Value> {
        self.node
    }

    /// The fully-qualified path of this position, e.g. `resources[1].properties.name`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// Walks `path` from this position, matching property names case-insensitively.
    ///
    /// An absent or empty path yields this position again. Otherwise the result holds
    /// exactly one resolver: the node found, or no node if any segment is missing. In the
    /// latter case the returned path is extended with the unresolved segments as given.
    /// Arrays are not stepped into; a segment naming an array-valued property yields the
    /// array itself.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use jsonresolve::PathResolver;
    /// use serde_json::json;
    ///
    /// let doc = json!({"A": {"B": {"C": true}}});
    /// let root = PathResolver::new(&doc, "");
    ///
    /// let found = root.resolve("a.b.c");
    /// assert_eq!(found[0].node(), Some(&json!(true)));
    /// assert_eq!(found[0].path(), "A.B.C");
    ///
    /// let missing = root.resolve("A.X.Y");
    /// assert_eq!(missing[0].node(), None);
    /// assert_eq!(missing[0].path(), "A.X.Y");
    /// ```
    pub fn resolve<'p>(&self, path: impl Into<Option<&'p str>>) -> Results<'a> {
        let path = path.into().unwrap_or_default();

        if let Some(cached) = self.paths.borrow().get(path) {
            log::trace!("cache hit for {path:?} at {:?}", self.path);
            return Rc::clone(cached);
        }

        let results: Results<'a> = Rc::from(vec![self.navigate(path)]);
        self.paths
            .borrow_mut()
            .insert(path.to_string(), Rc::clone(&results));
        results
    }

    fn navigate(&self, path: &str) -> Self {
        if path.is_empty() {
            return self.clone();
        }

        let mut node = self.node;
        let mut resolved = self.path.clone();
        let mut segments = path.split(self.separator.as_char());

        for segment in segments.by_ref() {
            match node.and_then(|value| find_property(value, segment)) {
                Some((key, child)) => {
                    resolved = append_token(&resolved, &PathToken::Key(key.to_string()));
                    node = Some(child);
                }
                None => {
                    log::trace!("no property {segment:?} at {resolved:?}");
                    resolved = append_token(&resolved, &PathToken::Key(segment.to_string()));
                    node = None;
                    break;
                }
            }
        }

        // Unresolved remainder, kept so the caller can report the path it asked for.
        for segment in segments {
            resolved = append_token(&resolved, &PathToken::Key(segment.to_string()));
        }

        self.child(node, resolved)
    }

    /// Finds the elements of this node's `resources` array whose `type` equals
    /// `resource_type` exactly.
    ///
    /// Each result is positioned at its element, e.g. `resources[2]`, in array order. A
    /// node without a `resources` array of objects yields no results.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use jsonresolve::PathResolver;
    /// use serde_json::json;
    ///
    /// let doc = json!({"resources": [{"type": "X"}, {"type": "Y"}, {"type": "X"}]});
    /// let root = PathResolver::new(&doc, "");
    ///
    /// let paths: Vec<_> = root
    ///     .resolve_resource_type("X")
    ///     .iter()
    ///     .map(|r| r.path().to_string())
    ///     .collect();
    /// assert_eq!(paths, ["resources[0]", "resources[2]"]);
    /// ```
    pub fn resolve_resource_type(&self, resource_type: &str) -> Results<'a> {
        if let Some(cached) = self.resource_types.borrow().get(resource_type) {
            log::trace!("cache hit for resource type {resource_type:?} at {:?}", self.path);
            return Rc::clone(cached);
        }

        let results: Results<'a> = match self
            .node
            .and_then(|node| resources_of_type(node, resource_type))
        {
            Some((key, matches)) => {
                let base = append_token(&self.path, &PathToken::Key(key.to_string()));
                matches
                    .into_iter()
                    .map(|(index, element)| {
                        self.child(Some(element), append_token(&base, &PathToken::Index(index)))
                    })
                    .collect()
            }
            None => Rc::from(Vec::new()),
        };

        self.resource_types
            .borrow_mut()
            .insert(resource_type.to_string(), Rc::clone(&results));
        results
    }

    /// Splits [`PathResolver::path`] into its tokens.
    pub fn tokens(&self) -> Result<Vec<PathToken>, ResolverError> {
        parse_path(&self.path)
    }

    /// Converts [`PathResolver::path`] into a JSON Pointer.
    ///
    /// The pointer is only meaningful against the document this resolver's root path is
    /// relative to.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use jsonresolve::PathResolver;
    /// use serde_json::json;
    ///
    /// let doc = json!({"resources": [{"type": "X", "properties": {"a/b": 1}}]});
    /// let root = PathResolver::new(&doc, "");
    /// let element = &root.resolve_resource_type("X")[0];
    /// let found = &element.resolve("properties.a/b")[0];
    ///
    /// let pointer = found.pointer().unwrap();
    /// assert_eq!(pointer.as_str(), "/resources/0/properties/a~1b");
    /// assert_eq!(doc.pointer(pointer.as_str()), found.node());
    /// ```
    pub fn pointer(&self) -> Result<PointerBuf, ResolverError> {
        let tokens = self.tokens()?.into_iter().map(|token| match token {
            PathToken::Key(key) => Token::new(key),
            PathToken::Index(index) => Token::new(index.to_string()),
        });
        Ok(PointerBuf::from_tokens(tokens))
    }
}

impl Clone for PathResolver<'_> {
    /// Copies the position; the clone starts with empty caches.
    fn clone(&self) -> Self {
        self.child(self.node, self.path.clone())
    }
}

impl PartialEq for PathResolver<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.path == other.path
    }
}

impl fmt::Debug for PathResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("node", &self.node)
            .field("path", &self.path)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PathResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
