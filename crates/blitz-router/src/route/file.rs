/// File path → route path conventions
///
/// Maps project-relative source files to the route they serve:
///
/// | File                                      | Route                 | Kind  |
/// |-------------------------------------------|-----------------------|-------|
/// | `pages/about.tsx`                         | `/about`              | Page  |
/// | `pages/post/index.tsx`                    | `/post`               | Page  |
/// | `app/products/pages/products/[id].tsx`    | `/products/[id]`      | Page  |
/// | `pages/api/webhook.ts`                    | `/api/webhook`        | Api   |
/// | `app/products/api/stripe.ts`              | `/api/stripe`         | Api   |
/// | `app/products/queries/getProduct.ts`      | `/api/rpc/getProduct` | Rpc   |
/// | `app/pages/(auth)/login.tsx`              | `/login`              | Page  |
///
/// The resolver never touches the filesystem; callers hand in paths.

use super::RouteKind;

/// Extensions treated as route sources
pub const PAGE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "mdx"];

/// Directories whose direct children are RPC resolvers
const RESOLVER_DIRS: &[&str] = &["queries", "mutations"];

/// Derives the route kind and route string for a project-relative file
///
/// Returns `None` when the file does not serve a route: unknown
/// extension, `_app`/`_document` style files, tests, or files outside
/// any `pages`, `api`, `queries` or `mutations` directory.
///
/// # Examples
///
/// ```
/// use blitz_router::route::file::route_for_file;
/// use blitz_router::RouteKind;
///
/// assert_eq!(
///     route_for_file("app/products/pages/products/[id].tsx"),
///     Some((RouteKind::Page, "products/[id]".to_string()))
/// );
/// assert_eq!(
///     route_for_file("app/products/queries/getProduct.ts"),
///     Some((RouteKind::Rpc, "api/rpc/getProduct".to_string()))
/// );
/// assert_eq!(route_for_file("pages/_app.tsx"), None);
/// ```
pub fn route_for_file(path: &str) -> Option<(RouteKind, String)> {
    let normalized = path.replace('\\', "/");
    let components: Vec<&str> = normalized
        .trim_start_matches("./")
        .split('/')
        .filter(|c| !c.is_empty())
        .collect();

    let (file_name, dirs) = components.split_last()?;
    let stem = route_stem(file_name)?;

    let (kind, mut rel) = match dirs.first().copied() {
        Some("pages") => (RouteKind::Page, dirs[1..].to_vec()),
        Some("app") => app_root(&dirs[1..], stem)?,
        _ => return None,
    };

    if kind == RouteKind::Rpc {
        return Some((kind, rel.join("/")));
    }

    if stem != "index" {
        rel.push(stem);
    }

    let kind = match kind {
        RouteKind::Page => RouteKind::for_route(rel.first().copied()),
        other => other,
    };

    Some((kind, rel.join("/")))
}

/// Strips the extension, rejecting non-route files
fn route_stem(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if !PAGE_EXTENSIONS.contains(&ext) {
        return None;
    }
    if stem.is_empty() || stem.starts_with('_') {
        return None;
    }
    if stem.ends_with(".test") || stem.ends_with(".spec") {
        return None;
    }
    Some(stem)
}

/// Route groups like `(auth)` organise `app/` folders without adding a
/// URL segment. The top-level `pages/` router has no groups.
fn is_route_group(dir: &str) -> bool {
    dir.len() > 2 && dir.starts_with('(') && dir.ends_with(')')
}

fn without_groups<'d, 'a>(dirs: &'d [&'a str]) -> impl Iterator<Item = &'a str> + 'd {
    dirs.iter().copied().filter(|dir| !is_route_group(dir))
}

/// Locates the first `pages` or `api` directory below `app/`,
/// falling back to resolver directories
fn app_root<'a>(dirs: &[&'a str], stem: &'a str) -> Option<(RouteKind, Vec<&'a str>)> {
    let root = dirs
        .iter()
        .position(|dir| matches!(*dir, "pages" | "api"));

    match root {
        Some(idx) if dirs[idx] == "pages" => {
            Some((RouteKind::Page, without_groups(&dirs[idx + 1..]).collect()))
        }
        Some(idx) => {
            let mut rel = vec!["api"];
            rel.extend(without_groups(&dirs[idx + 1..]));
            Some((RouteKind::Api, rel))
        }
        None => dirs
            .last()
            .filter(|dir| RESOLVER_DIRS.contains(dir))
            .map(|_| (RouteKind::Rpc, vec!["api", "rpc", stem])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pages/index.tsx", RouteKind::Page, "")]
    #[case("pages/about.tsx", RouteKind::Page, "about")]
    #[case("pages/post/index.js", RouteKind::Page, "post")]
    #[case("pages/post/[pid].tsx", RouteKind::Page, "post/[pid]")]
    #[case("pages/docs/[[...slug]].mdx", RouteKind::Page, "docs/[[...slug]]")]
    #[case("pages/api/user.ts", RouteKind::Api, "api/user")]
    #[case("pages/api/index.ts", RouteKind::Api, "api")]
    #[case("pages/api.ts", RouteKind::Api, "api")]
    #[case("pages/(g)/about.tsx", RouteKind::Page, "(g)/about")]
    #[case("app/pages/(auth)/login.tsx", RouteKind::Page, "login")]
    #[case("app/(shop)/products/pages/(admin)/orders.tsx", RouteKind::Page, "orders")]
    #[case("app/products/api/(hooks)/stripe.ts", RouteKind::Api, "api/stripe")]
    #[case("app/pages/index.tsx", RouteKind::Page, "")]
    #[case("app/products/pages/products/[id].tsx", RouteKind::Page, "products/[id]")]
    #[case("app/products/pages/products/[id]/edit.tsx", RouteKind::Page, "products/[id]/edit")]
    #[case("app/products/api/stripe.ts", RouteKind::Api, "api/stripe")]
    #[case("app/api/hooks/[provider].ts", RouteKind::Api, "api/hooks/[provider]")]
    #[case("app/products/queries/getProduct.ts", RouteKind::Rpc, "api/rpc/getProduct")]
    #[case("app/products/mutations/createProduct.ts", RouteKind::Rpc, "api/rpc/createProduct")]
    #[case("./pages/about.tsx", RouteKind::Page, "about")]
    #[case("pages\\users\\[id].tsx", RouteKind::Page, "users/[id]")]
    fn test_route_for_file(#[case] path: &str, #[case] kind: RouteKind, #[case] route: &str) {
        assert_eq!(route_for_file(path), Some((kind, route.to_string())));
    }

    #[rstest]
    #[case("pages/_app.tsx")]
    #[case("pages/_document.tsx")]
    #[case("pages/about.css")]
    #[case("pages/about")]
    #[case("pages/about.test.tsx")]
    #[case("app/products/pages/products/[id].spec.ts")]
    #[case("app/products/components/ProductForm.tsx")]
    #[case("app/products/queries/helpers/format.ts")]
    #[case("db/schema.prisma")]
    #[case("blitz.config.js")]
    fn test_non_route_files(#[case] path: &str) {
        assert_eq!(route_for_file(path), None);
    }
}
