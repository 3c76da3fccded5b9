use html_escape::{encode_double_quoted_attribute, encode_text};
use stock_core::StatusRowView;

const HEAD: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Stock Watch</title>
<style>
table { font-family: arial, sans-serif; border-collapse: collapse; width: 100%; }
td, th { border: 1px solid #dddddd; text-align: left; padding: 8px; }
</style>
</head>
<body>
<h1>Status of scraped websites</h1>
<table>
<tr><th>Site</th><th>Product</th><th>Last scraped</th><th>Has item in stock?</th></tr>
"#;

const TAIL: &str = "</table>\n</body>\n</html>\n";

/// Status table, one row per monitored site.
pub fn overview(rows: &[StatusRowView]) -> String {
    let mut html = String::from(HEAD);
    for row in rows {
        let stock_cell = if row.in_stock {
            r#"<td style="background-color:MediumSeaGreen;">YES!!</td>"#
        } else {
            r#"<td style="background-color:Tomato;">no</td>"#
        };
        html.push_str(&format!(
            "<tr><td>{domain}</td><td><a href=\"{href}\">{product}</a></td><td>{scraped}</td>{stock_cell}</tr>\n",
            domain = encode_text(&row.domain),
            href = encode_double_quoted_attribute(&row.url),
            product = encode_text(display_product(row)),
            scraped = encode_text(&row.last_scraped),
        ));
    }
    html.push_str(TAIL);
    html
}

/// Before the first scrape there is no product name; show the URL instead.
fn display_product(row: &StatusRowView) -> &str {
    if row.product.is_empty() {
        &row.url
    } else {
        &row.product
    }
}
