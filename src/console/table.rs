// src/console/table.rs

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Registro listável: id estável + campos onde a busca procura.
pub trait TableRecord {
    fn record_id(&self) -> &str;
    fn set_record_id(&mut self, id: &str);
    fn search_fields(&self) -> Vec<String>;
}

// "all" (ou vazio) significa "sem filtro" nos dropdowns
pub fn selected(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Valores distintos, na ordem em que aparecem (opções dos dropdowns).
pub fn distinct<T, F>(records: &[T], field: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        let value = field(record);
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

// ---
// TablePage: o que a tela mostra de uma página
// ---
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_matches: usize,
    // "Showing X to Y of N" (1-based; 0 a 0 quando vazio)
    pub first_index: usize,
    pub last_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub show_pagination: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl<T> TablePage<T> {
    pub fn map<U, F>(self, f: F) -> TablePage<U>
    where
        F: FnMut(T) -> U,
    {
        TablePage {
            rows: self.rows.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_matches: self.total_matches,
            first_index: self.first_index,
            last_index: self.last_index,
            has_previous: self.has_previous,
            has_next: self.has_next,
            show_pagination: self.show_pagination,
            empty_message: self.empty_message,
        }
    }

    pub fn showing_label(&self, noun: &str) -> String {
        format!(
            "Showing {} to {} of {} {}",
            self.first_index, self.last_index, self.total_matches, noun
        )
    }
}

// ---
// ResourceTable: busca + filtros + paginação, tudo em memória
// ---
pub struct ResourceTable<'a, T> {
    records: &'a [T],
    page_size: usize,
    needle: String,
    predicates: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<'a, T: TableRecord + Clone> ResourceTable<'a, T> {
    pub fn new(records: &'a [T], page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
            needle: String::new(),
            predicates: Vec::new(),
        }
    }

    /// Busca textual, sem diferenciar maiúsculas. O texto vale como digitado
    /// (espaços inclusive); só a busca vazia desliga o filtro.
    pub fn search(mut self, text: Option<&str>) -> Self {
        self.needle = text.unwrap_or_default().to_lowercase();
        self
    }

    /// Filtro categórico; todos precisam passar.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    fn matches(&self, record: &T) -> bool {
        let text_ok = self.needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle));
        text_ok && self.predicates.iter().all(|p| p(record))
    }

    pub fn matching(&self) -> Vec<&'a T> {
        self.records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Fatia a página pedida (1-based). Páginas fora do intervalo são ajustadas.
    pub fn page(&self, requested: usize, empty_message: &str) -> TablePage<T> {
        let matching = self.matching();
        let total_matches = matching.len();
        let total_pages = total_matches.div_ceil(self.page_size).max(1);
        let page = requested.clamp(1, total_pages);

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(total_matches);
        let rows: Vec<T> = matching[start..end].iter().map(|r| (*r).clone()).collect();

        TablePage {
            first_index: if total_matches == 0 { 0 } else { start + 1 },
            last_index: end,
            rows,
            page,
            total_pages,
            page_size: self.page_size,
            total_matches,
            has_previous: page > 1,
            has_next: page < total_pages,
            show_pagination: total_matches > self.page_size,
            empty_message: (total_matches == 0).then(|| empty_message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        name: String,
        tag: String,
    }

    impl TableRecord for Item {
        fn record_id(&self) -> &str {
            &self.id
        }
        fn set_record_id(&mut self, id: &str) {
            self.id = id.to_string();
        }
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone()]
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|i| Item {
                id: i.to_string(),
                name: format!("Item {}", i),
                tag: if i % 2 == 0 { "even".into() } else { "odd".into() },
            })
            .collect()
    }

    #[rstest]
    #[case(12, 1, 5, 1, 5)]
    #[case(12, 3, 2, 11, 12)]
    #[case(12, 9, 2, 11, 12)]
    #[case(12, 0, 5, 1, 5)]
    #[case(5, 1, 5, 1, 5)]
    fn pages_are_clamped_and_bounded(
        #[case] n: usize,
        #[case] requested: usize,
        #[case] rows: usize,
        #[case] first: usize,
        #[case] last: usize,
    ) {
        let data = items(n);
        let page = ResourceTable::new(&data, DEFAULT_PAGE_SIZE).page(requested, "empty");

        assert_eq!(page.rows.len(), rows);
        assert_eq!((page.first_index, page.last_index), (first, last));
        assert!(page.rows.len() <= DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn pagination_flags() {
        let data = items(12);
        let table = ResourceTable::new(&data, DEFAULT_PAGE_SIZE);

        let first = table.page(1, "empty");
        assert!(!first.has_previous && first.has_next && first.show_pagination);
        assert_eq!(first.total_pages, 3);

        let last = table.page(3, "empty");
        assert!(last.has_previous && !last.has_next);
        assert_eq!(last.showing_label("items"), "Showing 11 to 12 of 12 items");

        let few = items(5);
        assert!(!ResourceTable::new(&few, DEFAULT_PAGE_SIZE).page(1, "empty").show_pagination);
    }

    #[test]
    fn search_is_case_insensitive_and_filters_combine() {
        let data = items(12);
        let table = ResourceTable::new(&data, 50)
            .search(Some("ITEM 1"))
            .filter(|i: &Item| i.tag == "even");

        let ids: Vec<&str> = table.matching().iter().map(|i| i.record_id()).collect();
        assert_eq!(ids, vec!["10", "12"]);
    }

    fn named(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Item {
                id: i.to_string(),
                name: name.to_string(),
                tag: String::new(),
            })
            .collect()
    }

    #[rstest]
    #[case("jersey", 2)]
    #[case("JERSEY", 2)]
    #[case("jersey ", 0)]
    #[case(" ", 1)]
    #[case("home ", 1)]
    #[case(" jersey", 1)]
    #[case("", 3)]
    fn row_count_matches_raw_substring_count(#[case] needle: &str, #[case] expected: usize) {
        let data = named(&["Cap", "Home Jersey", "Jersey"]);
        let brute_force = data
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle.to_lowercase()))
            .count();

        let table = ResourceTable::new(&data, 50).search(Some(needle));
        assert_eq!(table.matching().len(), brute_force);
        assert_eq!(table.matching().len(), expected);
    }

    #[test]
    fn empty_result_carries_message() {
        let data = items(3);
        let page = ResourceTable::new(&data, 5).search(Some("nope")).page(1, "Nothing here");

        assert!(page.rows.is_empty());
        assert_eq!(page.empty_message.as_deref(), Some("Nothing here"));
        assert_eq!((page.first_index, page.last_index, page.total_pages), (0, 0, 1));
    }

    #[test]
    fn selected_treats_all_as_no_filter() {
        assert_eq!(selected(Some("all")), None);
        assert_eq!(selected(Some("")), None);
        assert_eq!(selected(None), None);
        assert_eq!(selected(Some("Jersey")), Some("Jersey"));
    }

    #[test]
    fn distinct_keeps_first_seen_order() {
        let data = items(4);
        assert_eq!(distinct(&data, |i| i.tag.as_str()), vec!["odd", "even"]);
    }
}
