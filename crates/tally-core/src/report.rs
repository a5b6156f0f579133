//! Reporting aggregator: chart-ready datasets from raw aggregation results
//!
//! Pure transformations, no I/O. The chart renderer collaborator consumes
//! these shapes and returns raster image paths.

use serde::{Deserialize, Serialize};

use crate::models::{CategorySpending, TopSpending};

/// Fewest bars a chart page should carry when more than one page exists
pub const MIN_BARS_PER_PAGE: usize = 4;

/// Most bars a single chart page can carry
pub const MAX_BARS_PER_PAGE: usize = 7;

/// One bar of a bar-chart page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartPoint {
    pub label: String,
    pub amount: f64,
    /// Deleted categories are annotated distinctly by the renderer
    pub deleted: bool,
}

/// One page of the per-category bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartPage {
    /// Zero-based page index
    pub index: usize,
    /// Total number of pages in the set
    pub count: usize,
    /// Bars sorted ascending by amount
    pub points: Vec<BarChartPoint>,
    /// Grand total across the whole period, carried on the first page only
    pub grand_total: Option<f64>,
}

/// One slice of the top-spending pie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub amount: f64,
}

/// Pie dataset for the top-N-with-other view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    pub total: f64,
}

/// Split per-category spending into bar-chart pages.
///
/// Bars are sorted ascending by amount. The page count starts at
/// `ceil(n / MAX)` and is reduced while any page would fall under `MIN`, so
/// pages end up carrying 4-7 bars whenever the data allows it. Returns no
/// pages for empty input.
pub fn bar_chart_pages(by_category: &[CategorySpending], grand_total: f64) -> Vec<BarChartPage> {
    if by_category.is_empty() {
        return Vec::new();
    }

    let mut points: Vec<BarChartPoint> = by_category
        .iter()
        .map(|c| BarChartPoint {
            label: c.name.clone(),
            amount: c.amount,
            deleted: c.is_deleted,
        })
        .collect();
    points.sort_by(|a, b| a.amount.total_cmp(&b.amount));

    let total = points.len();
    let mut pages = total.div_ceil(MAX_BARS_PER_PAGE);
    while pages > 1 && total < MIN_BARS_PER_PAGE * pages {
        pages -= 1;
    }
    let chunk = total.div_ceil(pages);

    points
        .chunks(chunk)
        .enumerate()
        .map(|(index, chunk_points)| BarChartPage {
            index,
            count: pages,
            points: chunk_points.to_vec(),
            grand_total: (index == 0).then_some(grand_total),
        })
        .collect()
}

/// Build the pie dataset from a top-N result.
///
/// An "other" slice is appended only when `other_sum != 0`. Returns `None`
/// when there is nothing to plot at all.
pub fn pie_chart(top: &TopSpending, other_label: &str) -> Option<PieChart> {
    if top.top.is_empty() && top.other_sum == 0.0 {
        return None;
    }

    let mut slices: Vec<PieSlice> = top
        .top
        .iter()
        .map(|r| PieSlice {
            label: r.name.clone(),
            amount: r.amount,
        })
        .collect();

    if top.other_sum != 0.0 {
        slices.push(PieSlice {
            label: other_label.to_string(),
            amount: top.other_sum,
        });
    }

    let total: f64 = slices.iter().map(|s| s.amount).sum();
    Some(PieChart { slices, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RankedCategory;

    fn spending(rows: &[(&str, f64, bool)]) -> Vec<CategorySpending> {
        rows.iter()
            .map(|(name, amount, is_deleted)| CategorySpending {
                name: name.to_string(),
                amount: *amount,
                is_deleted: *is_deleted,
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_pages() {
        assert!(bar_chart_pages(&[], 0.0).is_empty());
    }

    #[test]
    fn test_single_page_sorted_ascending() {
        let rows = spending(&[("Food", 300.0, false), ("Rent", 900.0, false), ("Fun", 50.0, true)]);
        let pages = bar_chart_pages(&rows, 1250.0);
        assert_eq!(pages.len(), 1);
        let amounts: Vec<f64> = pages[0].points.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![50.0, 300.0, 900.0]);
        assert_eq!(pages[0].grand_total, Some(1250.0));
        assert!(pages[0].points[0].deleted);
    }

    #[test]
    fn test_eight_categories_split_into_two_pages() {
        let rows: Vec<CategorySpending> = (0..8)
            .map(|i| CategorySpending {
                name: format!("c{}", i),
                amount: (i + 1) as f64,
                is_deleted: false,
            })
            .collect();
        let pages = bar_chart_pages(&rows, 36.0);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].points.len(), 4);
        assert_eq!(pages[1].points.len(), 4);
        assert_eq!(pages[0].grand_total, Some(36.0));
        assert_eq!(pages[1].grand_total, None);
        assert_eq!(pages[1].index, 1);
        assert_eq!(pages[1].count, 2);
    }

    #[test]
    fn test_pages_balance_without_undersized_tail() {
        // 10 bars: ceil(10/7) = 2 pages of 5, never 7+3
        let rows: Vec<CategorySpending> = (0..10)
            .map(|i| CategorySpending {
                name: format!("c{}", i),
                amount: (i + 1) as f64,
                is_deleted: false,
            })
            .collect();
        let pages = bar_chart_pages(&rows, 55.0);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].points.len(), 5);
        assert_eq!(pages[1].points.len(), 5);
    }

    #[test]
    fn test_seven_categories_stay_on_one_page() {
        let rows: Vec<CategorySpending> = (0..7)
            .map(|i| CategorySpending {
                name: format!("c{}", i),
                amount: (i + 1) as f64,
                is_deleted: false,
            })
            .collect();
        assert_eq!(bar_chart_pages(&rows, 28.0).len(), 1);
    }

    #[test]
    fn test_pie_with_other_slice() {
        let top = TopSpending {
            top: vec![
                RankedCategory { name: "Rent".into(), amount: 50.0 },
                RankedCategory { name: "Food".into(), amount: 40.0 },
                RankedCategory { name: "Fuel".into(), amount: 30.0 },
            ],
            other_sum: 30.0,
        };
        let pie = pie_chart(&top, "Other").unwrap();
        assert_eq!(pie.slices.len(), 4);
        assert_eq!(pie.slices[3].label, "Other");
        assert_eq!(pie.slices[3].amount, 30.0);
        assert_eq!(pie.total, 150.0);
    }

    #[test]
    fn test_pie_without_other_slice() {
        let top = TopSpending {
            top: vec![RankedCategory { name: "Rent".into(), amount: 50.0 }],
            other_sum: 0.0,
        };
        let pie = pie_chart(&top, "Other").unwrap();
        assert_eq!(pie.slices.len(), 1);
        assert_eq!(pie.total, 50.0);
    }

    #[test]
    fn test_pie_empty_is_none() {
        let top = TopSpending { top: vec![], other_sum: 0.0 };
        assert!(pie_chart(&top, "Other").is_none());
    }
}
