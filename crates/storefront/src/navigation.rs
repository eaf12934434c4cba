//! Mobile bottom navigation bar.

/// One entry in the bottom bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    /// Icon name from the static sprite sheet.
    pub icon: &'static str,
    pub active: bool,
}

const HIDDEN_ON: [&str; 2] = ["/login", "/register"];

const PUBLIC: [(&str, &str, &str); 3] = [
    ("Home", "/", "house"),
    ("Products", "/products", "search"),
    ("Categories", "/categories", "grid"),
];

const SIGNED_IN: [(&str, &str, &str); 3] = [
    ("Cart", "/cart", "cart"),
    ("Wishlist", "/wishlist", "heart"),
    ("Profile", "/profile", "user"),
];

/// Entries to show on `path`.
///
/// Empty on the auth pages and anywhere under `/admin`. Signed-in users also
/// get Cart, Wishlist and Profile, except that Cart is left out while on the
/// cart page itself.
#[must_use]
pub fn nav_items(path: &str, signed_in: bool) -> Vec<NavItem> {
    if HIDDEN_ON.contains(&path) || path.starts_with("/admin") {
        return Vec::new();
    }

    let user_entries: &[(&str, &str, &str)] = if signed_in { &SIGNED_IN } else { &[] };

    PUBLIC
        .iter()
        .chain(user_entries)
        .filter(|(_, href, _)| !(*href == "/cart" && path == "/cart"))
        .map(|&(name, href, icon)| NavItem {
            name,
            href,
            icon,
            active: href == path,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn names(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_hidden_on_auth_and_admin_pages() {
        assert!(nav_items("/login", true).is_empty());
        assert!(nav_items("/register", false).is_empty());
        assert!(nav_items("/admin", true).is_empty());
        assert!(nav_items("/admin/orders", true).is_empty());
    }

    #[test]
    fn test_guest_sees_public_entries() {
        let items = nav_items("/", false);
        assert_eq!(names(&items), ["Home", "Products", "Categories"]);
        assert!(items[0].active);
        assert!(!items[1].active);
    }

    #[test]
    fn test_signed_in_user_entries() {
        let items = nav_items("/wishlist", true);
        assert_eq!(
            names(&items),
            ["Home", "Products", "Categories", "Cart", "Wishlist", "Profile"]
        );
        let active: Vec<&str> = items.iter().filter(|i| i.active).map(|i| i.name).collect();
        assert_eq!(active, ["Wishlist"]);
    }

    #[test]
    fn test_cart_entry_omitted_on_cart_page() {
        let items = nav_items("/cart", true);
        assert_eq!(
            names(&items),
            ["Home", "Products", "Categories", "Wishlist", "Profile"]
        );
        assert!(items.iter().all(|i| !i.active));
    }
}
