// src/services/page.rs

//! Owned snapshot of the table structure of an HTML page.
//!
//! Pages are parsed once into plain data so that later stages can await
//! further fetches without holding on to the DOM.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::utils::text::{element_text, flatten_markup};

/// Number of leading `th`/`td` texts kept per table for header sniffing.
const HEADER_SAMPLE: usize = 10;

/// Tooltip attributes on a cell's anchor, in priority order.
const ANCHOR_ANNOTATION_ATTRS: [&str; 3] = ["data-content", "data-original-title", "title"];

/// A parsed page: its tables in document order and every link target.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub url: String,
    pub tables: Vec<Table>,

    /// Raw `href` values of all anchors, in document order
    pub links: Vec<String>,
}

/// One `<table>` element.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub id: Option<String>,
    pub caption: Option<String>,

    /// Text of the nearest heading preceding the table
    pub heading: Option<String>,

    /// First few `th`/`td` texts, lower-cased
    pub header_texts: Vec<String>,

    /// Rows owned by this table (rows of nested tables excluded)
    pub rows: Vec<Row>,
}

/// One `<tr>` element.
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// Non-empty texts of all `th`/`td` cells joined by spaces
    pub text: String,

    /// Texts of all `th`/`td` cells, in column order
    pub labels: Vec<String>,

    /// The `td` cells only
    pub cells: Vec<Cell>,
}

/// One `<td>` element.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub text: String,

    /// `href` of the first usable anchor inside the cell
    pub link: Option<String>,

    /// Tooltip text attached to the cell or its anchor
    pub annotation: Option<String>,
}

struct PageSelectors {
    blocks: Selector,
    rows: Selector,
    cells: Selector,
    anchor: Selector,
    links: Selector,
}

impl PageSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            blocks: parse_selector("h1, h2, h3, h4, h5, h6, table")?,
            rows: parse_selector("tr")?,
            cells: parse_selector("th, td")?,
            anchor: parse_selector("a")?,
            links: parse_selector("a[href]")?,
        })
    }
}

/// Parse a CSS selector, mapping failures into an [`AppError`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

impl Page {
    /// Parse `html`, fetched from `url`.
    pub fn parse(url: &str, html: &str) -> Result<Self> {
        let selectors = PageSelectors::new()?;
        let document = Html::parse_document(html);

        let mut tables = Vec::new();
        let mut last_heading: Option<String> = None;
        for element in document.select(&selectors.blocks) {
            if element.value().name() == "table" {
                tables.push(Table::from_element(element, last_heading.clone(), &selectors));
            } else {
                let text = element_text(element);
                if !text.is_empty() {
                    last_heading = Some(text);
                }
            }
        }

        let links = document
            .select(&selectors.links)
            .filter_map(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .collect();

        Ok(Self {
            url: url.to_string(),
            tables,
            links,
        })
    }

    /// Every row of every table, in document order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.tables.iter().flat_map(|t| t.rows.iter())
    }

    /// Find a table by its `id` attribute.
    pub fn table_by_id(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id.as_deref() == Some(id))
    }
}

impl Table {
    fn from_element(
        table: ElementRef<'_>,
        heading: Option<String>,
        selectors: &PageSelectors,
    ) -> Self {
        let caption = table
            .children()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "caption")
            .map(element_text)
            .filter(|t| !t.is_empty());

        let header_texts = table
            .select(&selectors.cells)
            .take(HEADER_SAMPLE)
            .map(|cell| element_text(cell).to_lowercase())
            .collect();

        let rows = table
            .select(&selectors.rows)
            .filter(|row| owning_table(*row) == Some(table))
            .map(|row| Row::from_element(row, selectors))
            .collect();

        Self {
            id: table.value().attr("id").map(str::to_string),
            caption,
            heading,
            header_texts,
            rows,
        }
    }

    /// Text used to classify the table: the caption, else the first row with text.
    pub fn leading_text(&self) -> Option<&str> {
        self.caption.as_deref().or_else(|| {
            self.rows
                .iter()
                .map(|r| r.text.as_str())
                .find(|t| !t.is_empty())
        })
    }
}

impl Row {
    fn from_element(row: ElementRef<'_>, selectors: &PageSelectors) -> Self {
        let mut texts = Vec::new();
        let mut cells = Vec::new();

        for child in row.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "td" => {
                    let cell = Cell::from_element(child, selectors);
                    texts.push(cell.text.clone());
                    cells.push(cell);
                }
                "th" => texts.push(element_text(child)),
                _ => {}
            }
        }

        let text = if texts.is_empty() {
            element_text(row)
        } else {
            texts
                .iter()
                .filter(|t| !t.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        };

        Self {
            text,
            labels: texts,
            cells,
        }
    }

    /// Text of the cell at `index`, or an empty string.
    pub fn cell_text(&self, index: usize) -> &str {
        self.cells.get(index).map_or("", |c| c.text.as_str())
    }
}

impl Cell {
    fn from_element(cell: ElementRef<'_>, selectors: &PageSelectors) -> Self {
        let anchor = cell.select(&selectors.anchor).next();

        let link = anchor
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| is_navigable(href))
            .map(str::to_string);

        let annotation = anchor
            .into_iter()
            .flat_map(|a| {
                ANCHOR_ANNOTATION_ATTRS
                    .iter()
                    .filter_map(move |attr| a.value().attr(attr))
            })
            .chain(cell.value().attr("data-content"))
            .map(flatten_markup)
            .find(|t| !t.is_empty());

        Self {
            text: element_text(cell),
            link,
            annotation,
        }
    }
}

fn is_navigable(href: &str) -> bool {
    !href.is_empty() && !href.starts_with('#') && !href.to_lowercase().starts_with("javascript:")
}

fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "table")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRICULUM: &str = r#"
        <html><body>
          <h3>Curriculum</h3>
          <table id="t1">
            <tr><th colspan="7">1. Semester</th></tr>
            <tr>
              <td><a href="syllabus.php?c=SE101" data-content="<b>Core</b> course">SE 101</a></td>
              <td></td><td>Intro to Programming</td><td>2</td><td>2</td><td>3</td><td>6</td>
            </tr>
          </table>
          <h4>Electives</h4>
          <table>
            <caption>Elective Courses</caption>
            <tr><td>ELEC 001<table class="inner"><tr><td>nested</td></tr></table></td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_tables_in_order() {
        let page = Page::parse("https://example.com/new/akademik.php", CURRICULUM).unwrap();

        // outer tables plus the nested one
        assert_eq!(page.tables.len(), 3);
        let first = &page.tables[0];
        assert_eq!(first.id.as_deref(), Some("t1"));
        assert_eq!(first.heading.as_deref(), Some("Curriculum"));
        assert_eq!(first.leading_text(), Some("1. Semester"));
        assert_eq!(first.rows.len(), 2);
        assert!(first.rows[0].cells.is_empty());
    }

    #[test]
    fn test_cell_link_and_annotation() {
        let page = Page::parse("https://example.com/", CURRICULUM).unwrap();
        let row = &page.tables[0].rows[1];
        assert_eq!(row.cells.len(), 7);
        assert_eq!(row.cell_text(0), "SE 101");
        assert_eq!(row.cell_text(2), "Intro to Programming");
        assert_eq!(row.cells[0].link.as_deref(), Some("syllabus.php?c=SE101"));
        assert_eq!(row.cells[0].annotation.as_deref(), Some("Core, course"));
    }

    #[test]
    fn test_caption_and_nested_rows() {
        let page = Page::parse("https://example.com/", CURRICULUM).unwrap();
        let electives = &page.tables[1];
        assert_eq!(electives.heading.as_deref(), Some("Electives"));
        assert_eq!(electives.leading_text(), Some("Elective Courses"));
        assert_eq!(electives.rows.len(), 1);
        assert_eq!(page.tables[2].rows.len(), 1);
    }

    #[test]
    fn test_links_collected() {
        let page = Page::parse("https://example.com/", CURRICULUM).unwrap();
        assert_eq!(page.links, vec!["syllabus.php?c=SE101".to_string()]);
    }

    #[test]
    fn test_annotation_priority_falls_back_to_cell() {
        let html = r##"<table><tr>
            <td data-content="from cell"><a href="#">POOL 3</a></td>
            <td><a href="x.php" title="Title text" data-original-title="Original">A</a></td>
        </tr></table>"##;
        let page = Page::parse("https://example.com/", html).unwrap();
        let cells = &page.tables[0].rows[0].cells;
        assert_eq!(cells[0].annotation.as_deref(), Some("from cell"));
        assert!(cells[0].link.is_none());
        assert_eq!(cells[1].annotation.as_deref(), Some("Original"));
    }
}
