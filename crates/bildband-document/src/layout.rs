// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout planner. Assigns pictures to pages under a fixed capacity rule:
// the first page (which also carries the title) holds fewer, larger pictures
// than the pages after it.

use bildband_core::BatchConfig;
use bildband_core::types::{Cm, PageRule};

/// Capacity and picture size for the first and subsequent pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRules {
    pub first_page: PageRule,
    pub later_pages: PageRule,
}

impl LayoutRules {
    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            first_page: config.first_page,
            later_pages: config.later_pages,
        }
    }

    /// Rule for a 1-based page number.
    pub fn rule_for(&self, page: usize) -> &PageRule {
        if page <= 1 {
            &self.first_page
        } else {
            &self.later_pages
        }
    }
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self::from_config(&BatchConfig::default())
    }
}

/// Where one picture goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// 1-based page number.
    pub page: usize,
    /// 0-based position on the page.
    pub slot: usize,
    pub width: Cm,
    pub height: Cm,
    /// A page break follows this picture.
    pub break_after: bool,
}

/// Incremental planner: call `place` once per picture, in order.
#[derive(Debug, Clone)]
pub struct LayoutPlanner {
    rules: LayoutRules,
    page: usize,
    on_page: usize,
}

impl LayoutPlanner {
    pub fn new(rules: LayoutRules) -> Self {
        Self {
            rules,
            page: 1,
            on_page: 0,
        }
    }

    /// Page the next picture will land on.
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Place the next picture. `is_last` suppresses the break after the final
    /// picture so a document never ends on an empty page.
    pub fn place(&mut self, is_last: bool) -> Placement {
        let rule = *self.rules.rule_for(self.page);
        let placement_page = self.page;
        let slot = self.on_page;

        self.on_page += 1;
        let break_after = !is_last && self.on_page >= rule.capacity;
        if break_after {
            self.page += 1;
            self.on_page = 0;
        }

        Placement {
            page: placement_page,
            slot,
            width: rule.width,
            height: rule.height,
            break_after,
        }
    }
}

/// One page of a finished plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// 1-based page number.
    pub number: usize,
    pub width: Cm,
    pub height: Cm,
    /// Indices into the picture list, in order.
    pub images: Vec<usize>,
}

/// Plan `count` pictures onto pages. An empty list yields no pages.
pub fn plan_pages(count: usize, rules: LayoutRules) -> Vec<PagePlan> {
    let mut planner = LayoutPlanner::new(rules);
    let mut pages: Vec<PagePlan> = Vec::new();

    for index in 0..count {
        let placement = planner.place(index + 1 == count);
        if placement.slot == 0 {
            pages.push(PagePlan {
                number: placement.page,
                width: placement.width,
                height: placement.height,
                images: Vec::new(),
            });
        }
        if let Some(page) = pages.last_mut() {
            page.images.push(index);
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaks(count: usize) -> usize {
        let mut planner = LayoutPlanner::new(LayoutRules::default());
        (0..count)
            .map(|i| planner.place(i + 1 == count))
            .filter(|p| p.break_after)
            .count()
    }

    #[test]
    fn five_images_fill_two_pages() {
        let pages = plan_pages(5, LayoutRules::default());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].images, vec![0, 1]);
        assert_eq!(pages[1].images, vec![2, 3, 4]);
        assert_eq!(breaks(5), 1);
    }

    #[test]
    fn first_page_uses_larger_pictures() {
        let pages = plan_pages(3, LayoutRules::default());
        assert_eq!((pages[0].width, pages[0].height), (Cm(18.46), Cm(9.05)));
        assert_eq!((pages[1].width, pages[1].height), (Cm(16.41), Cm(7.68)));
    }

    #[test]
    fn last_image_never_breaks() {
        // Exactly fills page one and page two.
        let mut planner = LayoutPlanner::new(LayoutRules::default());
        let placements: Vec<_> = (0..5).map(|i| planner.place(i == 4)).collect();
        assert!(!placements[4].break_after);
        assert!(placements[1].break_after);
        assert_eq!(planner.current_page(), 2);

        assert_eq!(breaks(2), 0);
        assert_eq!(breaks(1), 0);
    }

    #[test]
    fn empty_folder_has_no_pages() {
        assert!(plan_pages(0, LayoutRules::default()).is_empty());
        assert_eq!(breaks(0), 0);
    }

    #[test]
    fn later_pages_hold_three() {
        let pages = plan_pages(9, LayoutRules::default());
        let sizes: Vec<_> = pages.iter().map(|p| p.images.len()).collect();
        assert_eq!(sizes, vec![2, 3, 3, 1]);
        assert_eq!(breaks(9), 3);
        let numbers: Vec<_> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn slots_restart_on_each_page() {
        let mut planner = LayoutPlanner::new(LayoutRules::default());
        let slots: Vec<_> = (0..6).map(|i| planner.place(i == 5).slot).collect();
        assert_eq!(slots, vec![0, 1, 0, 1, 2, 0]);
    }
}
