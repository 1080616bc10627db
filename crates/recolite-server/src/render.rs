//! HTML rendering for the trending and search pages.
//!
//! Every catalog field is escaped before it reaches the page: titles and
//! image URLs come straight from the CSV sources.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use recolite_core::CatalogEntry;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f6f6f6;color:#222}\
header{background:#232f3e;color:#fff;padding:1rem 2rem;display:flex;gap:2rem;align-items:center}\
header a{color:#fff;text-decoration:none}\
main{padding:1.5rem 2rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:1rem}\
.card{background:#fff;border-radius:6px;padding:.75rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
.card img{width:100%;height:160px;object-fit:contain}\
.card .category{font-size:.8rem;color:#666}\
.card .price{font-weight:bold;color:#b12704}\
.match{outline:2px solid #ff9900}\
input{padding:.5rem;width:24rem;max-width:90%}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><strong>Recolite</strong><a href=\"/\">Trending</a><a href=\"/search/\">Search</a></header>\n\
         <main>\n{body}</main>\n</body>\n</html>\n",
        encode_text(title)
    )
}

fn write_card(out: &mut String, entry: &CatalogEntry) {
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "<div class=\"card\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">\
         <div class=\"title\">{}</div><div class=\"category\">{}</div>\
         <div class=\"price\">${}</div></div>\n",
        encode_double_quoted_attribute(&entry.img_url),
        encode_double_quoted_attribute(&entry.title),
        encode_text(&entry.title),
        encode_text(&entry.category),
        entry.price_display(),
    );
}

/// The home page listing `trending` products.
#[must_use]
pub fn home_page(trending: &[&CatalogEntry]) -> String {
    let mut body = String::from("<h1>Trending products</h1>\n");
    if trending.is_empty() {
        body.push_str("<p>No products available.</p>\n");
    } else {
        body.push_str("<div class=\"grid\">\n");
        for entry in trending {
            write_card(&mut body, entry);
        }
        body.push_str("</div>\n");
    }
    page("Recolite - Trending", &body)
}

/// The search page. Results are fetched from `/ajax_search/` by the browser.
#[must_use]
pub fn search_page() -> String {
    const BODY: &str = r#"<h1>Search products</h1>
<form id="search-form"><input id="query" name="query" type="search" placeholder="Search products" autocomplete="off"></form>
<p id="status"></p>
<div id="results" class="grid"></div>
<script>
const esc = (s) => String(s).replace(/[&<>"']/g, (c) => ({"&":"&amp;","<":"&lt;",">":"&gt;","\"":"&quot;","'":"&#39;"}[c]));
async function runSearch(event) {
  if (event) event.preventDefault();
  const query = document.getElementById("query").value.trim();
  const results = document.getElementById("results");
  const status = document.getElementById("status");
  results.innerHTML = "";
  if (!query) { status.textContent = ""; return; }
  const response = await fetch("/ajax_search/?query=" + encodeURIComponent(query));
  const data = await response.json();
  status.textContent = data.results.length ? "" : "No results.";
  results.innerHTML = data.results.map((p, i) =>
    `<div class="card${i === 0 ? " match" : ""}"><img src="${esc(p.imgUrl)}" alt="${esc(p.title)}" loading="lazy">` +
    `<div class="title">${esc(p.title)}</div><div class="category">${esc(p.category)}</div>` +
    `<div class="price">$${esc(p.price)}</div></div>`).join("");
}
document.getElementById("search-form").addEventListener("submit", runSearch);
</script>
"#;
    page("Recolite - Search", BODY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, img: &str) -> CatalogEntry {
        CatalogEntry {
            asin: "A1".to_string(),
            title: title.to_string(),
            category: "Toys & Games".to_string(),
            price: 3.5,
            img_url: img.to_string(),
        }
    }

    #[test]
    fn test_home_page_escapes_fields() {
        let e = entry("<script>alert(1)</script>", "http://x/\"onerror=\"a");
        let html = home_page(&[&e]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("\"onerror=\""));
        assert!(html.contains("Toys &amp; Games"));
        assert!(html.contains("$3.50"));
    }

    #[test]
    fn test_home_page_empty() {
        let html = home_page(&[]);
        assert!(html.contains("No products available."));
        assert!(!html.contains("class=\"card\""));
    }

    #[test]
    fn test_search_page_calls_search_endpoint() {
        let html = search_page();
        assert!(html.contains("/ajax_search/?query="));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
