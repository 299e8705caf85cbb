use itertools::Itertools;
use eucl::{Ring, RingOps};

/// The isomorphism type of a finitely generated module:
/// `R^rank ⊕ R/(t_0) ⊕ R/(t_1) ⊕ ...`.
pub trait RModStr
where Self::R: Ring, for<'x> &'x Self::R: RingOps<Self::R> {
    type R;

    fn rank(&self) -> usize;
    fn tors(&self) -> &[Self::R];

    // number of summands.
    fn dim(&self) -> usize {
        self.rank() + self.tors().len()
    }

    fn is_zero(&self) -> bool {
        self.rank() == 0 && self.is_free()
    }

    fn is_free(&self) -> bool {
        self.tors().is_empty()
    }

    fn math_symbol(&self) -> String {
        rmod_str_symbol(self.rank(), self.tors(), "0")
    }
}

pub fn rmod_str_symbol<R>(rank: usize, tors: &[R], dflt: &str) -> String
where R: Ring, for<'x> &'x R: RingOps<R> {
    use eucl::util::format::superscript;

    if rank == 0 && tors.is_empty() {
        return dflt.to_string()
    }

    let symbol = R::math_symbol();
    let mut res = vec![];

    if rank > 1 {
        res.push(format!("{}{}", symbol, superscript(rank as isize)));
    } else if rank == 1 {
        res.push(symbol.clone());
    }

    // equal divisors are adjacent after Smith elimination.
    for (r, t) in tors.iter().dedup_with_count() {
        let str = if r > 1 {
            format!("({}/{}){}", symbol, t, superscript(r as isize))
        } else {
            format!("{}/{}", symbol, t)
        };
        res.push(str);
    }

    res.join(" ⊕ ")
}

#[cfg(test)]
mod tests {
    use eucl::FF;
    use super::*;

    struct Str(usize, Vec<i32>);

    impl RModStr for Str {
        type R = i32;
        fn rank(&self) -> usize { self.0 }
        fn tors(&self) -> &[i32] { &self.1 }
    }

    #[test]
    fn flags() {
        let s = Str(0, vec![]);
        assert!(s.is_zero());
        assert!(s.is_free());
        assert_eq!(s.dim(), 0);

        let s = Str(2, vec![3]);
        assert!(!s.is_zero());
        assert!(!s.is_free());
        assert_eq!(s.dim(), 3);
    }

    #[test]
    fn symbol() {
        assert_eq!(Str(0, vec![]).math_symbol(), "0");
        assert_eq!(Str(1, vec![]).math_symbol(), "Z");
        assert_eq!(Str(2, vec![]).math_symbol(), "Z²");
        assert_eq!(Str(0, vec![2]).math_symbol(), "Z/2");
        assert_eq!(Str(2, vec![2, 4]).math_symbol(), "Z² ⊕ Z/2 ⊕ Z/4");
        assert_eq!(Str(1, vec![2, 2, 6]).math_symbol(), "Z ⊕ (Z/2)² ⊕ Z/6");
    }

    #[test]
    fn symbol_ff() {
        let s = rmod_str_symbol::<FF<5>>(3, &[], ".");
        assert_eq!(s, "F₅³");
        let s = rmod_str_symbol::<FF<5>>(0, &[], ".");
        assert_eq!(s, ".");
    }
}
