use crate::app::tmdb::MovieRecord;

/// Number of posters shown per carousel page.
pub const PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    Idle,
    Advancing,
}

/// Page index of the poster carousel, guarded against overlapping slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    page_index: usize,
    /// Page that is sliding out while `transitioning` is set.
    previous_index: usize,
    transitioning: bool,
}

/// Highest page index for `results_len` results, the banner excluded.
///
/// Fewer than `PAGE_SIZE` carousel movies still make one page.
pub fn max_index(results_len: usize) -> usize {
    let total_movies = results_len.saturating_sub(1);
    (total_movies / PAGE_SIZE).saturating_sub(1)
}

fn page_slice(results: &[MovieRecord], index: usize) -> &[MovieRecord] {
    let pool = results.get(1..).unwrap_or(&[]);
    let start = (index * PAGE_SIZE).min(pool.len());
    let end = (start + PAGE_SIZE).min(pool.len());
    &pool[start..end]
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn phase(&self) -> CarouselPhase {
        if self.transitioning {
            CarouselPhase::Advancing
        } else {
            CarouselPhase::Idle
        }
    }

    /// Moves to the next page, wrapping after the last one.
    ///
    /// Returns `false` without touching the state when nothing is loaded or a
    /// slide is still running.
    pub fn advance(&mut self, results_len: Option<usize>) -> bool {
        let Some(results_len) = results_len else {
            return false;
        };
        if self.transitioning {
            return false;
        }

        let max = max_index(results_len);
        self.previous_index = self.page_index;
        self.page_index = if self.page_index >= max {
            0
        } else {
            self.page_index + 1
        };
        self.transitioning = true;
        true
    }

    /// The outgoing row finished its exit animation.
    pub fn exit_complete(&mut self) {
        self.transitioning = false;
    }

    pub fn visible<'a>(&self, results: &'a [MovieRecord]) -> &'a [MovieRecord] {
        page_slice(results, self.page_index)
    }

    /// The row sliding out, only while a transition is running.
    pub fn outgoing<'a>(&self, results: &'a [MovieRecord]) -> Option<&'a [MovieRecord]> {
        self.transitioning
            .then(|| page_slice(results, self.previous_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tmdb::fixtures::page_of;

    fn ids(movies: &[MovieRecord]) -> Vec<u64> {
        movies.iter().map(|m| m.id).collect()
    }

    fn advance_and_settle(carousel: &mut Carousel, len: usize) {
        assert!(carousel.advance(Some(len)));
        carousel.exit_complete();
    }

    #[test]
    fn starts_idle_on_first_page() {
        let carousel = Carousel::new();
        assert_eq!(carousel.page_index(), 0);
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn single_page_wraps_to_itself() {
        let mut carousel = Carousel::new();
        advance_and_settle(&mut carousel, 7);
        assert_eq!(carousel.page_index(), 0);
        advance_and_settle(&mut carousel, 7);
        assert_eq!(carousel.page_index(), 0);
    }

    #[test]
    fn two_pages_alternate() {
        assert_eq!(max_index(13), 1);
        let mut carousel = Carousel::new();
        let mut seen = vec![carousel.page_index()];
        for _ in 0..5 {
            advance_and_settle(&mut carousel, 13);
            seen.push(carousel.page_index());
        }
        assert_eq!(seen, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn advance_while_transitioning_is_ignored() {
        let mut carousel = Carousel::new();
        assert!(carousel.advance(Some(20)));
        let during = carousel.clone();
        assert!(!carousel.advance(Some(20)));
        assert_eq!(carousel, during);
        assert_eq!(carousel.phase(), CarouselPhase::Advancing);

        carousel.exit_complete();
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn advance_without_data_is_ignored() {
        let mut carousel = Carousel::new();
        assert!(!carousel.advance(None));
        assert_eq!(carousel, Carousel::new());
    }

    #[test]
    fn short_lists_never_produce_invalid_bounds() {
        for len in 0..PAGE_SIZE + 1 {
            assert_eq!(max_index(len), 0);
            let mut carousel = Carousel::new();
            advance_and_settle(&mut carousel, len);
            assert_eq!(carousel.page_index(), 0);
        }
    }

    #[test]
    fn index_stays_in_range_and_revisits_zero() {
        for len in 0..60 {
            let max = max_index(len);
            let mut carousel = Carousel::new();
            let mut returned_to_zero = false;
            for _ in 0..=max + 1 {
                advance_and_settle(&mut carousel, len);
                assert!(carousel.page_index() <= max);
                returned_to_zero |= carousel.page_index() == 0;
            }
            assert!(returned_to_zero, "len {} never wrapped", len);
        }
    }

    #[test]
    fn slices_skip_the_banner() {
        let page = page_of(13);
        let mut carousel = Carousel::new();
        assert_eq!(ids(carousel.visible(&page.results)), vec![2, 3, 4, 5, 6, 7]);

        assert!(carousel.advance(Some(page.results.len())));
        assert_eq!(ids(carousel.visible(&page.results)), vec![8, 9, 10, 11, 12, 13]);
        assert_eq!(
            ids(carousel.outgoing(&page.results).unwrap()),
            vec![2, 3, 4, 5, 6, 7]
        );

        carousel.exit_complete();
        assert!(carousel.outgoing(&page.results).is_none());
    }

    #[test]
    fn partial_and_empty_pools() {
        let carousel = Carousel::new();
        assert_eq!(ids(carousel.visible(&page_of(4).results)), vec![2, 3, 4]);
        assert!(carousel.visible(&page_of(1).results).is_empty());
        assert!(carousel.visible(&[]).is_empty());
    }
}
