/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }
}

/// List responses that carry items plus a `nextPageToken`.
pub trait Paged {
    type Item;

    fn into_page(self) -> Page<Self::Item>;
}

/// Fetch pages sequentially until the returned token is absent or empty.
///
/// `fetch` receives the token from the previous page (`None` first). `on_page` is
/// called with each page's items in order. Returns the number of pages fetched.
pub fn for_each_page<T, E, F, G>(mut fetch: F, mut on_page: G) -> Result<usize, E>
where
    F: FnMut(Option<&str>) -> Result<Page<T>, E>,
    G: FnMut(Vec<T>) -> Result<(), E>,
{
    let mut token: Option<String> = None;
    let mut pages = 0usize;
    loop {
        let page = fetch(token.as_deref())?;
        pages += 1;
        tracing::debug!(
            page = pages,
            items = page.items.len(),
            has_next = page.next_page_token.is_some(),
            "fetched page"
        );
        on_page(page.items)?;

        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(next) => token = Some(next),
            None => return Ok(pages),
        }
    }
}

/// Fetch every page and concatenate the items.
pub fn collect_pages<T, E, F>(fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<&str>) -> Result<Page<T>, E>,
{
    let mut all = Vec::new();
    for_each_page(fetch, |items| {
        all.extend(items);
        Ok(())
    })?;
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_first_page_without_token() {
        let mut calls = 0;
        let items = collect_pages::<_, (), _>(|token| {
            calls += 1;
            assert_eq!(token, None);
            Ok(Page::new(vec![1, 2], None))
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn k_tokens_mean_k_plus_one_calls() {
        let k = 3;
        let mut seen: Vec<Option<String>> = Vec::new();
        let items = collect_pages::<_, (), _>(|token| {
            seen.push(token.map(str::to_string));
            let n = seen.len();
            let next = if n <= k { Some(format!("t{n}")) } else { Some(String::new()) };
            Ok(Page::new(vec![n], next))
        })
        .unwrap();
        assert_eq!(seen.len(), k + 1);
        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            seen,
            vec![
                None,
                Some("t1".to_string()),
                Some("t2".to_string()),
                Some("t3".to_string())
            ]
        );
    }

    #[test]
    fn fetch_error_stops_the_loop() {
        let mut calls = 0;
        let result = for_each_page(
            |_| {
                calls += 1;
                if calls == 2 {
                    Err("boom")
                } else {
                    Ok(Page::new(vec![calls], Some("next".to_string())))
                }
            },
            |_| Ok(()),
        );
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 2);
    }
}
