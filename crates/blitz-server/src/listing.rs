// File: src/listing.rs
// Purpose: Human-readable route listing for the `routes` command

use blitz_router::{RouteKind, RouteTable};
use colored::Colorize;

/// Formats one line per route, in precedence order
pub fn lines(table: &RouteTable) -> Vec<String> {
    let width = table
        .routes()
        .map(|r| r.to_string().len())
        .max()
        .unwrap_or(0);

    table
        .routes()
        .map(|route| {
            let kind = match route.kind() {
                RouteKind::Page => "page".green(),
                RouteKind::Api => "api ".yellow(),
                RouteKind::Rpc => "rpc ".cyan(),
            };
            format!(
                "  {} {:<width$}  {}",
                kind,
                route.to_string().bold(),
                route.source().dimmed(),
                width = width
            )
        })
        .collect()
}

/// Prints the route listing to stdout
pub fn print(table: &RouteTable) {
    if table.is_empty() {
        println!("{}", "No routes discovered".yellow());
        return;
    }

    println!("{} {}", "Routes:".bold(), table.len());
    for line in lines(table) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Removes SGR escape sequences so assertions hold with or without a tty
    fn plain(line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                chars.by_ref().find(|&c| c == 'm');
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_plain_strips_escapes() {
        assert_eq!(plain("\u{1b}[1m/post\u{1b}[0m x"), "/post x");
        assert_eq!(plain("no escapes"), "no escapes");
    }

    #[test]
    fn test_lines_follow_precedence() {
        let table = RouteTable::from_files([
            "pages/post/[...slug].tsx",
            "pages/post/[pid].tsx",
            "pages/post/create.tsx",
            "app/products/queries/getProduct.ts",
        ])
        .unwrap();

        let lines: Vec<String> = lines(&table).iter().map(|l| plain(l)).collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("/post/create"));
        assert!(lines[1].contains("/api/rpc/getProduct"));
        assert!(lines[1].contains("rpc"));
        assert!(lines[2].contains("/post/[pid]"));
        assert!(lines[3].contains("/post/[...slug]"));
        assert!(lines[3].ends_with("pages/post/[...slug].tsx"));
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::from_files(Vec::<String>::new()).unwrap();
        assert!(lines(&table).is_empty());
    }
}
