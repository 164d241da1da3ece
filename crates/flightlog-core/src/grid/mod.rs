pub mod airport;
pub mod route;

use crate::extraction::Token;
use serde::{Deserialize, Serialize};

/// A table reconstructed from page geometry: rows × named columns of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// A grid with the given columns and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Grid {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.as_str())
    }
}

/// Index of the half-open interval `[bounds[i], bounds[i + 1])` holding `v`.
///
/// `bounds` must be strictly increasing.
pub fn interval_index(bounds: &[f32], v: f32) -> Option<usize> {
    let (first, last) = (bounds.first()?, bounds.last()?);
    if bounds.len() < 2 || !v.is_finite() || v < *first || v >= *last {
        return None;
    }
    Some(bounds.partition_point(|b| *b <= v) - 1)
}

/// Whether every boundary is strictly greater than the one before it.
pub fn strictly_increasing(bounds: &[f32]) -> bool {
    bounds.windows(2).all(|w| w[0] < w[1])
}

/// Place text at points into cells by containment.
///
/// Row `r` spans `[yy[r], yy[r + 1])` and column `c` spans `[xx[c], xx[c + 1])`.
/// Every output row has `columns` cells; boundary columns beyond `columns`
/// are not populated, and points outside every band are dropped. Texts that
/// land in the same cell are joined with a single space in input order.
pub fn assign_points<'a, I>(points: I, xx: &[f32], yy: &[f32], columns: usize) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = ((f32, f32), &'a str)>,
{
    let row_count = yy.len().saturating_sub(1);
    let populated = xx.len().saturating_sub(1).min(columns);

    let mut buckets: Vec<Vec<Vec<&str>>> = vec![vec![Vec::new(); populated]; row_count];
    for ((x, y), text) in points {
        let (Some(r), Some(c)) = (interval_index(yy, y), interval_index(xx, x)) else {
            continue;
        };
        if c < populated {
            buckets[r][c].push(text);
        }
    }

    buckets
        .into_iter()
        .map(|row| {
            let mut cells: Vec<String> = row.into_iter().map(|texts| texts.join(" ")).collect();
            cells.resize(columns, String::new());
            cells
        })
        .collect()
}

/// Assign tokens to cells by their center point.
pub fn assign_cells(tokens: &[Token], xx: &[f32], yy: &[f32], columns: usize) -> Vec<Vec<String>> {
    assign_points(
        tokens.iter().map(|t| (t.center(), t.text.as_str())),
        xx,
        yy,
        columns,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::BBox;

    fn token(text: &str, cx: f32, cy: f32) -> Token {
        Token::new(text, BBox::new(cx - 4.0, cy - 3.0, cx + 4.0, cy + 3.0))
    }

    #[test]
    fn test_interval_index_half_open() {
        let bounds = [0.0, 10.0, 20.0];
        assert_eq!(interval_index(&bounds, 0.0), Some(0));
        assert_eq!(interval_index(&bounds, 9.99), Some(0));
        assert_eq!(interval_index(&bounds, 10.0), Some(1));
        assert_eq!(interval_index(&bounds, 20.0), None);
        assert_eq!(interval_index(&bounds, -1.0), None);
        assert_eq!(interval_index(&[5.0], 5.0), None);
        assert_eq!(interval_index(&[], 5.0), None);
        assert_eq!(interval_index(&bounds, f32::NAN), None);
        assert_eq!(interval_index(&bounds, f32::INFINITY), None);
    }

    #[test]
    fn test_assign_cells_drops_non_finite_centers() {
        let xx = [0.0, 50.0];
        let yy = [0.0, 20.0];
        let tokens = vec![
            Token::new("bad", BBox::new(f32::NAN, 5.0, 10.0, 15.0)),
            token("ok", 25.0, 10.0),
        ];
        let rows = assign_cells(&tokens, &xx, &yy, 1);
        assert_eq!(rows, vec![vec!["ok"]]);
    }

    #[test]
    fn test_assign_cells_joins_in_token_order() {
        let xx = [0.0, 50.0, 100.0];
        let yy = [0.0, 20.0, 40.0];
        let tokens = vec![
            token("B", 30.0, 10.0),
            token("A", 10.0, 10.0),
            token("C", 20.0, 12.0),
            token("D", 70.0, 30.0),
        ];
        let rows = assign_cells(&tokens, &xx, &yy, 2);
        assert_eq!(rows, vec![vec!["B A C", ""], vec!["", "D"]]);
    }

    #[test]
    fn test_assign_cells_is_a_partition() {
        let xx = [0.0, 50.0, 100.0];
        let yy = [0.0, 20.0, 40.0];
        let tokens = vec![
            token("in", 25.0, 10.0),
            token("edge", 50.0, 20.0),
            token("left-out", -10.0, 10.0),
            token("below-out", 25.0, 45.0),
        ];
        let rows = assign_cells(&tokens, &xx, &yy, 2);
        let placed: Vec<&str> = rows
            .iter()
            .flatten()
            .filter(|c| !c.is_empty())
            .map(|c| c.as_str())
            .collect();
        assert_eq!(placed, vec!["in", "edge"]);
        // a token on a shared boundary lands in the later interval only
        assert_eq!(rows[1][1], "edge");
    }

    #[test]
    fn test_assign_cells_pads_and_truncates_columns() {
        let xx = [0.0, 10.0, 20.0, 30.0];
        let yy = [0.0, 10.0];
        let tokens = vec![token("a", 5.0, 5.0), token("c", 25.0, 5.0)];

        let narrow = assign_cells(&tokens, &xx, &yy, 2);
        assert_eq!(narrow, vec![vec!["a", ""]]);

        let wide = assign_cells(&tokens, &xx, &yy, 5);
        assert_eq!(wide, vec![vec!["a", "", "c", "", ""]]);
    }

    #[test]
    fn test_grid_accessors() {
        let grid = Grid {
            columns: vec!["A".into()],
            rows: vec![vec!["x".into()]],
        };
        assert_eq!(grid.cell(0, 0), Some("x"));
        assert_eq!(grid.cell(1, 0), None);
        assert!(Grid::empty(vec!["A".into()]).is_empty());
    }
}
