//! Output formatting for the CLI.

use bandstore_cart::render::CartView;
use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the cart as a table, or as JSON in JSON mode.
    pub fn cart(&self, view: &CartView) {
        if self.json {
            self.json(view);
            return;
        }

        self.header("Cart");
        if view.is_empty() {
            println!("  {}", style(bandstore_cart::render::EMPTY_CART_TEXT).dim());
        } else {
            let widths = column_widths(view);
            self.table_row(&["ID", "ITEM", "QTY", "PRICE", "LINE"], &widths);
            for item in &view.items {
                let quantity = item.quantity.to_string();
                self.table_row(
                    &[
                        item.id.as_str(),
                        item.name.as_str(),
                        quantity.as_str(),
                        item.unit_price.as_str(),
                        item.line_price.as_str(),
                    ],
                    &widths,
                );
            }
        }
        println!();
        self.kv("Items", &view.item_count.to_string());
        self.kv("Total", &style(&view.total).bold().to_string());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn column_widths(view: &CartView) -> [usize; 5] {
    let mut widths = [2, 4, 3, 5, 4];
    for item in &view.items {
        let cols = [
            item.id.chars().count(),
            item.name.chars().count(),
            item.quantity.to_string().len(),
            item.unit_price.chars().count(),
            item.line_price.chars().count(),
        ];
        for (width, len) in widths.iter_mut().zip(cols) {
            *width = (*width).max(len);
        }
    }
    widths
}
