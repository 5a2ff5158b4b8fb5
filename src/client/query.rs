//! Query-string construction for collection endpoints.

use serde::{de::DeserializeOwned, Serialize};

use crate::model::{Category, Media, Page, Post, Tag};

pub const DEFAULT_PER_PAGE: u32 = 100;

/// Upper bound the API enforces on `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    Date,
    Modified,
    Title,
    Slug,
    Id,
    MenuOrder,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

/// Status filter. `Any` only exists as a filter, never on an entity.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Publish,
    Draft,
    Pending,
    Private,
    Any,
    /// Attachments are stored as `inherit`; `publish` is rejected by `/media`.
    Inherit,
}

/// A collection endpoint and the ordering its listings default to.
pub trait Resource: DeserializeOwned {
    const PATH: &'static str;
    const DEFAULT_ORDERBY: OrderBy = OrderBy::Date;
    const DEFAULT_ORDER: Order = Order::Desc;
    const DEFAULT_STATUS: StatusFilter = StatusFilter::Publish;
}

impl Resource for Page {
    const PATH: &'static str = "pages";
    const DEFAULT_ORDERBY: OrderBy = OrderBy::MenuOrder;
    const DEFAULT_ORDER: Order = Order::Asc;
}

impl Resource for Post {
    const PATH: &'static str = "posts";
}

impl Resource for Media {
    const PATH: &'static str = "media";
    const DEFAULT_STATUS: StatusFilter = StatusFilter::Inherit;
}

impl Resource for Category {
    const PATH: &'static str = "categories";
    const DEFAULT_ORDERBY: OrderBy = OrderBy::Id;
    const DEFAULT_ORDER: Order = Order::Asc;
}

impl Resource for Tag {
    const PATH: &'static str = "tags";
    const DEFAULT_ORDERBY: OrderBy = OrderBy::Id;
    const DEFAULT_ORDER: Order = Order::Asc;
}

/// Listing options. Unset fields take the resource's defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub embed: Option<bool>,
    pub orderby: Option<OrderBy>,
    pub order: Option<Order>,
    pub status: Option<StatusFilter>,
    pub search: Option<String>,
    pub slug: Option<String>,
    pub parent: Option<u64>,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn embed(mut self, embed: bool) -> Self {
        self.embed = Some(embed);
        self
    }

    pub fn orderby(mut self, orderby: OrderBy) -> Self {
        self.orderby = Some(orderby);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn parent(mut self, parent: u64) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn categories(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.categories = ids.into_iter().collect();
        self
    }

    pub fn tags(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.tags = ids.into_iter().collect();
        self
    }

    /// Encodes the options for `R`'s collection endpoint.
    pub fn query_string<R: Resource>(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let query = Query {
            per_page: self.per_page.unwrap_or(DEFAULT_PER_PAGE),
            page: self.page.unwrap_or(1),
            orderby: self.orderby.unwrap_or(R::DEFAULT_ORDERBY),
            order: self.order.unwrap_or(R::DEFAULT_ORDER),
            status: self.status.unwrap_or(R::DEFAULT_STATUS),
            embed: self.embed.unwrap_or(true).then_some("true"),
            search: non_empty(&self.search),
            slug: non_empty(&self.slug),
            parent: self.parent,
            categories: join_ids(&self.categories),
            tags: join_ids(&self.tags),
        };
        serde_urlencoded::to_string(&query)
    }
}

#[derive(Serialize)]
struct Query<'a> {
    per_page: u32,
    page: u32,
    orderby: OrderBy,
    order: Order,
    status: StatusFilter,
    #[serde(rename = "_embed", skip_serializing_if = "Option::is_none")]
    embed: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn join_ids(ids: &[u64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_defaults() {
        assert_eq!(
            FetchOptions::new().query_string::<Post>().unwrap(),
            "per_page=100&page=1&orderby=date&order=desc&status=publish&_embed=true"
        );
    }

    #[test]
    fn resource_defaults() {
        assert_eq!(
            FetchOptions::new().query_string::<Page>().unwrap(),
            "per_page=100&page=1&orderby=menu_order&order=asc&status=publish&_embed=true"
        );
        assert_eq!(
            FetchOptions::new().embed(false).query_string::<Category>().unwrap(),
            "per_page=100&page=1&orderby=id&order=asc&status=publish"
        );
        assert_eq!(
            FetchOptions::new().embed(false).query_string::<Media>().unwrap(),
            "per_page=100&page=1&orderby=date&order=desc&status=inherit"
        );
    }

    #[test]
    fn caller_overrides_resource_defaults() {
        let options = FetchOptions::new().orderby(OrderBy::Title).per_page(20);
        assert_eq!(
            options.query_string::<Page>().unwrap(),
            "per_page=20&page=1&orderby=title&order=asc&status=publish&_embed=true"
        );
    }

    #[test]
    fn filters_are_appended_in_order() {
        let options = FetchOptions::new()
            .status(StatusFilter::Any)
            .search("art & craft")
            .slug("hello-world")
            .parent(0)
            .categories([3, 4])
            .tags([7]);
        assert_eq!(
            options.query_string::<Post>().unwrap(),
            "per_page=100&page=1&orderby=date&order=desc&status=any&_embed=true\
             &search=art+%26+craft&slug=hello-world&parent=0&categories=3%2C4&tags=7"
        );
    }

    #[test]
    fn empty_filters_are_skipped() {
        let options = FetchOptions::new()
            .embed(false)
            .search("")
            .slug("")
            .categories(Vec::new());
        assert_eq!(
            options.query_string::<Post>().unwrap(),
            "per_page=100&page=1&orderby=date&order=desc&status=publish"
        );
    }
}
