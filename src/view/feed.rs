use crate::models::article::Article;

// Noticias por bloque en portada, barra lateral y carrusel
pub const PAGE_SIZE: usize = 3;

// Estado de la portada. Se arma de cero en cada carga o búsqueda,
// así que el desplazamiento siempre empieza en 0.
#[derive(Debug, Clone, Default)]
pub struct FeedView {
    items: Vec<Article>,
    offset: usize,
    query: Option<String>,
}

impl FeedView {
    pub fn new(items: Vec<Article>, query: Option<&str>) -> Self {
        Self {
            items,
            offset: 0,
            query: query
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn shown(&self) -> usize {
        self.offset
    }

    // Siguiente bloque de "Cargar más"; nunca repite una noticia
    pub fn next_page(&mut self) -> &[Article] {
        let start = self.offset.min(self.items.len());
        let end = (start + PAGE_SIZE).min(self.items.len());
        self.offset = end;
        &self.items[start..end]
    }

    // Avanza hasta mostrar al menos `count` noticias (redondeado a bloques)
    pub fn pages_up_to(&mut self, count: usize) -> Vec<Article> {
        let mut shown = Vec::new();
        loop {
            let page = self.next_page();
            if page.is_empty() {
                break;
            }
            shown.extend_from_slice(page);
            if shown.len() >= count {
                break;
            }
        }
        shown
    }

    // El botón se oculta justo cuando no queda nada por mostrar
    pub fn has_more(&self) -> bool {
        self.offset < self.items.len()
    }

    pub fn sidebar(&self) -> &[Article] {
        &self.items[..PAGE_SIZE.min(self.items.len())]
    }

    pub fn carousel(&self) -> Vec<&Article> {
        self.items
            .iter()
            .filter(|item| item.is_featured)
            .take(PAGE_SIZE)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn articles(count: usize) -> Vec<Article> {
        (1..=count as i64)
            .map(|id| Article {
                id,
                title: Some(format!("Noticia {id}")),
                encabezado: None,
                description: None,
                image_url: None,
                is_featured: id % 2 == 0,
                is_photo_of_week: false,
                created_at: Utc::now(),
            })
            .collect()
    }

    fn ids(page: &[Article]) -> Vec<i64> {
        page.iter().map(|a| a.id).collect()
    }

    #[test]
    fn pages_are_disjoint_until_exhausted() {
        let mut view = FeedView::new(articles(7), None);

        assert_eq!(ids(view.next_page()), vec![1, 2, 3]);
        assert!(view.has_more());
        assert_eq!(ids(view.next_page()), vec![4, 5, 6]);
        assert!(view.has_more());
        assert_eq!(ids(view.next_page()), vec![7]);
        assert!(!view.has_more());

        // Clics de más no repiten nada
        assert!(view.next_page().is_empty());
        assert!(view.next_page().is_empty());
        assert_eq!(view.shown(), 7);
    }

    #[test]
    fn control_hides_exactly_on_a_full_last_page() {
        let mut view = FeedView::new(articles(6), None);
        view.next_page();
        assert!(view.has_more());
        view.next_page();
        assert!(!view.has_more());
    }

    #[test]
    fn pages_up_to_rounds_to_whole_pages() {
        let mut view = FeedView::new(articles(8), None);
        assert_eq!(view.pages_up_to(4).len(), 6);
        assert!(view.has_more());

        let mut view = FeedView::new(articles(8), None);
        assert_eq!(view.pages_up_to(100).len(), 8);
        assert!(!view.has_more());
    }

    #[test]
    fn sidebar_and_carousel_take_three() {
        let view = FeedView::new(articles(10), None);
        assert_eq!(ids(view.sidebar()), vec![1, 2, 3]);
        let featured: Vec<i64> = view.carousel().iter().map(|a| a.id).collect();
        assert_eq!(featured, vec![2, 4, 6]);
    }

    #[test]
    fn empty_view_has_nothing_to_show() {
        let mut view = FeedView::new(Vec::new(), Some("  "));
        assert!(view.is_empty());
        assert_eq!(view.query(), None);
        assert!(view.next_page().is_empty());
        assert!(!view.has_more());
        assert!(view.sidebar().is_empty());
    }
}
