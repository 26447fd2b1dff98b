//! Hash-fragment routes and navigation staleness tags.
//!
//! # Design
//! - Parsing is total: every fragment maps to a route, unknown paths land on
//!   [`Route::NotFound`].
//! - Leading `#`/`/` runs are collapsed so doubled prefixes (`#/#/sites`)
//!   resolve like their single form; trailing slashes are ignored.
//! - Path parameters are percent-decoded on the way in and encoded on the way
//!   out.

use std::fmt;

/// Named routes of the shell.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Route {
    /// `/` landing view.
    #[default]
    Home,
    /// `/sites` listing.
    Sites,
    /// `/drives/:siteId` listing.
    Drives {
        /// Owning site id.
        site_id: String,
    },
    /// `/files/:driveId` listing.
    Files {
        /// Owning drive id.
        drive_id: String,
    },
    /// `/no-navigo` static informational view.
    NoNavigo,
    /// Fallback for unmatched paths.
    NotFound {
        /// Normalised path that failed to match.
        path: String,
    },
}

impl Route {
    /// Parse a hash fragment (with or without the leading `#`).
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let without_query = fragment.split('?').next().unwrap_or_default();
        let trimmed = without_query
            .trim_start_matches(['#', '/'])
            .trim_end_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };
        match segments.as_slice() {
            [] => Self::Home,
            ["sites"] => Self::Sites,
            ["no-navigo"] => Self::NoNavigo,
            ["drives", id] if !id.is_empty() => Self::Drives {
                site_id: decode_segment(id),
            },
            ["files", id] if !id.is_empty() => Self::Files {
                drive_id: decode_segment(id),
            },
            _ => Self::NotFound {
                path: format!("/{trimmed}"),
            },
        }
    }

    /// Canonical path without the `#` prefix.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Sites => "/sites".to_string(),
            Self::Drives { site_id } => format!("/drives/{}", urlencoding::encode(site_id)),
            Self::Files { drive_id } => format!("/files/{}", urlencoding::encode(drive_id)),
            Self::NoNavigo => "/no-navigo".to_string(),
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Link target usable in anchors.
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    /// Stable route name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Sites => "sites-list",
            Self::Drives { .. } => "drives-list",
            Self::Files { .. } => "files-list",
            Self::NoNavigo => "no-navigo",
            Self::NotFound { .. } => "not-found",
        }
    }

    /// Site id carried by the route, when any.
    #[must_use]
    pub fn site_id(&self) -> Option<&str> {
        match self {
            Self::Drives { site_id } => Some(site_id),
            _ => None,
        }
    }

    /// Drive id carried by the route, when any.
    #[must_use]
    pub fn drive_id(&self) -> Option<&str> {
        match self {
            Self::Files { drive_id } => Some(drive_id),
            _ => None,
        }
    }

    /// Menu entry highlighted while this route is active.
    #[must_use]
    pub const fn menu_section(&self) -> Option<MenuSection> {
        match self {
            Self::Home => Some(MenuSection::Home),
            Self::Sites | Self::Drives { .. } | Self::Files { .. } => Some(MenuSection::Sites),
            Self::NoNavigo => Some(MenuSection::NoNavigo),
            Self::NotFound { .. } => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |value| value.into_owned())
}

/// Top navigation menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSection {
    /// Landing page link.
    Home,
    /// Sites hierarchy link.
    Sites,
    /// Informational page link.
    NoNavigo,
}

impl MenuSection {
    /// All menu entries in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Home, Self::Sites, Self::NoNavigo]
    }

    /// Route the entry links to.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::Sites => Route::Sites,
            Self::NoNavigo => Route::NoNavigo,
        }
    }

    /// Translation key for the entry label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Home => "nav.home",
            Self::Sites => "nav.sites",
            Self::NoNavigo => "nav.no_navigo",
        }
    }
}

/// Staleness tag issued per navigation; only the latest one may write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationTicket(u64);

impl NavigationTicket {
    /// Ticket following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw generation number, for logging.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/sites"), Route::Sites);
        assert_eq!(
            Route::parse("#/drives/SITE1"),
            Route::Drives {
                site_id: "SITE1".into()
            }
        );
        assert_eq!(
            Route::parse("/files/D%201"),
            Route::Files {
                drive_id: "D 1".into()
            }
        );
        assert_eq!(Route::parse("#/no-navigo"), Route::NoNavigo);
    }

    #[test]
    fn doubled_prefix_and_trailing_slash_normalise() {
        assert_eq!(Route::parse("#/#/sites"), Route::Sites);
        assert_eq!(Route::parse("#/sites/"), Route::Sites);
        assert_eq!(Route::parse("#/sites?tab=1"), Route::Sites);
    }

    #[test]
    fn unmatched_paths_are_not_found() {
        assert_eq!(
            Route::parse("#/drives"),
            Route::NotFound {
                path: "/drives".into()
            }
        );
        assert_eq!(Route::parse("#/nope/deeper").name(), "not-found");
    }

    #[test]
    fn paths_round_trip_through_encoding() {
        let route = Route::Drives {
            site_id: "a b/c".into(),
        };
        assert_eq!(route.href(), "#/drives/a%20b%2Fc");
        assert_eq!(Route::parse(&route.href()), route);
    }

    #[test]
    fn tickets_advance() {
        let first = NavigationTicket::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.generation(), 1);
    }
}
