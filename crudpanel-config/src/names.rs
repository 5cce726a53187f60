//! Entity-derived names and route prefix.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Display names for an entity type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityNames {
    pub singular: String,
    pub plural: String,
}

impl EntityNames {
    /// Derive names from an entity type name such as `BlogPost` or `blog_post`.
    pub fn derive(entity: &str) -> Self {
        let singular = entity.to_case(Case::Title);
        let plural = pluralize(&singular);
        Self { singular, plural }
    }

    /// URL slug for the plural name, e.g. `blog-posts`.
    pub fn slug(&self) -> String {
        self.plural.to_case(Case::Kebab)
    }

    /// Route prefix under the framework's route root.
    pub fn route_prefix(&self, route_root: &str) -> String {
        let root = route_root.trim_matches('/');
        if root.is_empty() {
            self.slug()
        } else {
            format!("{root}/{}", self.slug())
        }
    }
}

/// English plural of the last word of a title-cased name.
fn pluralize(name: &str) -> String {
    let lower = name.to_lowercase();
    let ends_with_consonant_y = lower.ends_with('y')
        && !matches!(
            lower.chars().rev().nth(1),
            Some('a' | 'e' | 'i' | 'o' | 'u') | None
        );

    if ends_with_consonant_y {
        format!("{}ies", &name[..name.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("post", "Post", "Posts")]
    #[case("BlogPost", "Blog Post", "Blog Posts")]
    #[case("blog_post", "Blog Post", "Blog Posts")]
    #[case("category", "Category", "Categories")]
    #[case("day", "Day", "Days")]
    #[case("box", "Box", "Boxes")]
    #[case("address", "Address", "Addresses")]
    #[case("branch", "Branch", "Branches")]
    fn derive_names(#[case] entity: &str, #[case] singular: &str, #[case] plural: &str) {
        let names = EntityNames::derive(entity);
        assert_eq!(names.singular, singular);
        assert_eq!(names.plural, plural);
    }

    #[test]
    fn slug_is_kebab_plural() {
        assert_eq!(EntityNames::derive("BlogPost").slug(), "blog-posts");
    }

    #[rstest]
    #[case("admin", "admin/blog-posts")]
    #[case("/admin/", "admin/blog-posts")]
    #[case("", "blog-posts")]
    fn route_prefix_joins_root(#[case] root: &str, #[case] expected: &str) {
        assert_eq!(EntityNames::derive("blog_post").route_prefix(root), expected);
    }
}
