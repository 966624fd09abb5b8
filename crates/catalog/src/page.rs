//! Product grid paging state.

use serde::{Deserialize, Serialize};

use shopfront_core::Cursor;

use crate::product::{PageInfo, Product, ProductConnection};

/// One fetched page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub products: Vec<Product>,
    pub page_info: PageInfo,
}

impl From<ProductConnection> for Page {
    fn from(conn: ProductConnection) -> Self {
        Self {
            products: conn.nodes,
            page_info: conn.page_info,
        }
    }
}

/// Products visible in a collection grid plus the position of the next page.
///
/// Only ever grows: a merge appends products and replaces the cursor fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub products: Vec<Product>,
    pub end_cursor: Option<Cursor>,
    pub has_next_page: bool,
}

impl PageState {
    /// Seed from the first server-rendered page.
    pub fn from_page(page: Page) -> Self {
        Self {
            products: page.products,
            end_cursor: page.page_info.end_cursor,
            has_next_page: page.page_info.has_next_page,
        }
    }

    /// Append a subsequent page. Products keep arrival order and are not
    /// de-duplicated by id.
    pub fn merge(&mut self, page: Page) -> usize {
        let appended = page.products.len();
        self.products.extend(page.products);
        self.end_cursor = page.page_info.end_cursor;
        self.has_next_page = page.page_info.has_next_page;
        appended
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<ProductConnection> for PageState {
    fn from(conn: ProductConnection) -> Self {
        Self::from_page(conn.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Nodes;
    use shopfront_core::ProductId;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: id.to_string(),
            handle: id.to_string(),
            published_at: None,
            variants: Nodes::default(),
        }
    }

    #[test]
    fn merge_appends_without_deduplicating() {
        let mut state = PageState::from_page(Page {
            products: vec![product("a"), product("b")],
            page_info: PageInfo { has_next_page: true, end_cursor: Some(Cursor::new("c1")) },
        });

        let appended = state.merge(Page {
            products: vec![product("b"), product("c")],
            page_info: PageInfo::last_page(),
        });

        assert_eq!(appended, 2);
        let ids: Vec<_> = state.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "b", "c"]);
        assert!(!state.has_next_page);
        assert_eq!(state.end_cursor, None);
    }
}
