use std::fmt::Display;
use itertools::Itertools;
use num_traits::ToPrimitive;

/// Wraps `s` in parentheses when it is a compound expression.
pub fn paren_expr<S>(s: S) -> String
where S: Display {
    let s = s.to_string();
    if s.contains(' ') { format!("({s})") } else { s }
}

/// Formats a linear combination `Σ r·x` as "2x - y + 3".
/// A basis symbol "1" stands for the constant term.
pub fn lc<X, R, S>(terms: S) -> String
where
    X: Display,
    R: Display,
    S: Iterator<Item = (X, R)>
{
    let mut res = String::new();

    for (k, (x, r)) in terms.enumerate() {
        let x = x.to_string();
        let r = paren_expr(r);
        let (neg, r) = match r.strip_prefix('-') {
            Some(r) => (true, r.to_string()),
            None => (false, r)
        };

        let term = match (r.as_str(), x.as_str()) {
            ("1", _) => x.clone(),
            (_, "1") => r,
            _ => format!("{r}{x}")
        };

        match (k, neg) {
            (0, false) => {},
            (0, true)  => res.push('-'),
            (_, false) => res.push_str(" + "),
            (_, true)  => res.push_str(" - ")
        }
        res.push_str(&term);
    }

    res
}

fn script<I>(i: I, minus: char, digits: &[char; 10]) -> String
where I: ToPrimitive {
    let Some(i) = i.to_i64() else {
        return String::from("?")
    };
    let sign = (i < 0).then_some(minus);
    let abs = i.unsigned_abs().to_string();
    let body = abs.bytes().map(|b| digits[(b - b'0') as usize]);
    sign.into_iter().chain(body).collect()
}

pub fn subscript<I>(i: I) -> String
where I: ToPrimitive {
    script(i, '₋', &['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'])
}

pub fn superscript<I>(i: I) -> String
where I: ToPrimitive {
    script(i, '⁻', &['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'])
}

/// Renders `entry(i, j)` as a borderless table with row and column headers.
pub fn table<S, I, J, I1, I2, D, F>(head: S, rows: I1, cols: I2, entry: F) -> String
where
    S: Display,
    I: Display,
    J: Display,
    I1: Iterator<Item = I>,
    I2: Iterator<Item = J>,
    D: Display,
    F: Fn(&I, &J) -> D
{
    use prettytable::{format, Cell, Row, Table};

    let cols = cols.collect_vec();
    let row = |head: String, cells: Vec<String>| {
        Row::new(
            std::iter::once(head).chain(cells).map(|s| Cell::new(&s)).collect()
        )
    };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row(head.to_string(), cols.iter().map(|j| j.to_string()).collect()));

    for i in rows {
        let cells = cols.iter().map(|j| entry(&i, j).to_string()).collect();
        table.add_row(row(i.to_string(), cells));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_comb() {
        assert_eq!(lc([("x", 2), ("y", -1), ("1", 3)].into_iter()), "2x - y + 3");
        assert_eq!(lc([("x", -1), ("1", -1)].into_iter()), "-x - 1");
        assert_eq!(lc([("1", 1)].into_iter()), "1");
        assert_eq!(lc([("x", "a + b")].into_iter()), "(a + b)x");
    }

    #[test]
    fn scripts() {
        assert_eq!(subscript(5), "₅");
        assert_eq!(subscript(-120), "₋₁₂₀");
        assert_eq!(superscript(0), "⁰");
        assert_eq!(superscript(2), "²");
        assert_eq!(superscript(-31), "⁻³¹");
    }

    #[test]
    fn render_table() {
        let t = table("", 1..=2, 0..=1, |i, j| i * 10 + j);
        let lines = t.lines().map(|l| l.split_whitespace().collect_vec()).collect_vec();
        assert_eq!(lines, vec![
            vec!["0", "1"],
            vec!["1", "10", "11"],
            vec!["2", "20", "21"],
        ]);
    }
}
