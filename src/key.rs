//! Cipher keys: substitution bijections and column-order permutations.
//!
//! Both key types keep their structural invariant by construction. The
//! substitution key stores paired forward/inverse arrays that are updated
//! together on every swap, so a partial or duplicated mapping cannot exist.

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{CbResult, CipherBreakError};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// A bijection cipher-letter -> plain-letter over the 26-letter alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionKey {
    /// forward[cipher ordinal] = plain ordinal
    forward: [u8; ALPHABET_LEN],
    /// inverse[plain ordinal] = cipher ordinal
    inverse: [u8; ALPHABET_LEN],
}

impl SubstitutionKey {
    /// The identity mapping (every letter decrypts to itself).
    pub fn identity() -> Self {
        let mut forward = [0u8; ALPHABET_LEN];
        for (i, slot) in forward.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self {
            forward,
            inverse: forward,
        }
    }

    /// Builds a key from a forward table, rejecting anything that is not a
    /// true bijection.
    pub fn from_forward(forward: [u8; ALPHABET_LEN]) -> CbResult<Self> {
        let mut inverse = [u8::MAX; ALPHABET_LEN];
        for (cipher, &plain) in forward.iter().enumerate() {
            if plain as usize >= ALPHABET_LEN {
                return Err(CipherBreakError::Validation(format!(
                    "substitution target {} out of alphabet range",
                    plain
                )));
            }
            if inverse[plain as usize] != u8::MAX {
                return Err(CipherBreakError::Validation(format!(
                    "substitution key maps two letters to '{}'",
                    alphabet::letter(plain as usize) as char
                )));
            }
            inverse[plain as usize] = cipher as u8;
        }
        Ok(Self { forward, inverse })
    }

    /// A uniformly random bijection.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut forward = [0u8; ALPHABET_LEN];
        for (i, slot) in forward.iter_mut().enumerate() {
            *slot = i as u8;
        }
        rng.shuffle(&mut forward);
        let mut inverse = [0u8; ALPHABET_LEN];
        for (cipher, &plain) in forward.iter().enumerate() {
            inverse[plain as usize] = cipher as u8;
        }
        Self { forward, inverse }
    }

    /// Plain ordinal a cipher ordinal decrypts to.
    #[inline]
    pub fn plain_for(&self, cipher_ord: usize) -> usize {
        self.forward[cipher_ord] as usize
    }

    /// Swaps the plain-letter targets of two cipher letters, keeping the
    /// inverse table consistent.
    pub fn swap(&mut self, cipher_a: usize, cipher_b: usize) {
        let pa = self.forward[cipher_a];
        let pb = self.forward[cipher_b];
        self.forward[cipher_a] = pb;
        self.forward[cipher_b] = pa;
        self.inverse[pa as usize] = cipher_b as u8;
        self.inverse[pb as usize] = cipher_a as u8;
    }

    /// The inverted key (plain -> cipher becomes the forward direction).
    pub fn invert(&self) -> Self {
        Self {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    /// Maps every letter through the forward table. Non-alphabetic
    /// characters pass through; letters come out uppercase.
    pub fn decrypt(&self, ciphertext: &str) -> String {
        self.apply(ciphertext, &self.forward)
    }

    /// Maps every letter through the inverse table, so that
    /// `decrypt(encrypt(t)) == t` (restricted to alphabetic characters).
    pub fn encrypt(&self, plaintext: &str) -> String {
        self.apply(plaintext, &self.inverse)
    }

    fn apply(&self, text: &str, table: &[u8; ALPHABET_LEN]) -> String {
        text.chars()
            .map(|c| match alphabet::ordinal(c as u8) {
                Some(ord) if c.is_ascii() => alphabet::letter(table[ord] as usize) as char,
                _ => c,
            })
            .collect()
    }

    /// (cipher, plain) letter pairs in cipher-alphabet order.
    pub fn pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.forward.iter().enumerate().map(|(cipher, &plain)| {
            (
                alphabet::letter(cipher) as char,
                alphabet::letter(plain as usize) as char,
            )
        })
    }
}

impl fmt::Display for SubstitutionKey {
    /// 26 plain letters in cipher-alphabet order, e.g. the identity key
    /// prints as "ABCDEFGHIJKLMNOPQRSTUVWXYZ".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &plain in &self.forward {
            write!(f, "{}", alphabet::letter(plain as usize) as char)?;
        }
        Ok(())
    }
}

impl Serialize for SubstitutionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A permutation of `0..k` assigning each physical ciphertext column a rank
/// in the original column order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TranspositionKey {
    ranks: Vec<usize>,
}

impl TranspositionKey {
    /// Builds a key from rank values, rejecting non-permutations.
    pub fn new(ranks: Vec<usize>) -> CbResult<Self> {
        let k = ranks.len();
        if k == 0 {
            return Err(CipherBreakError::Validation(
                "transposition key must not be empty".to_string(),
            ));
        }
        let mut seen = vec![false; k];
        for &r in &ranks {
            if r >= k || seen[r] {
                return Err(CipherBreakError::Validation(format!(
                    "transposition key {:?} is not a permutation of 0..{}",
                    ranks, k
                )));
            }
            seen[r] = true;
        }
        Ok(Self { ranks })
    }

    /// A uniformly random permutation of the given length.
    pub fn random(len: usize, rng: &mut fastrand::Rng) -> Self {
        let mut ranks: Vec<usize> = (0..len).collect();
        rng.shuffle(&mut ranks);
        Self { ranks }
    }

    /// Internal constructor for values already known to be a permutation.
    pub(crate) fn from_permutation(ranks: Vec<usize>) -> Self {
        debug_assert!(Self::new(ranks.clone()).is_ok());
        Self { ranks }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Swaps two positions in the key. Permutations are closed under swaps.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.ranks.swap(i, j);
    }

    /// Physical column indices in ascending order of their rank value.
    fn column_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.ranks.len()).collect();
        order.sort_by_key(|&c| self.ranks[c]);
        order
    }

    /// Columnar transposition: text goes row-major into a `k`-column grid,
    /// columns are read out in ascending rank order. Input is normalized
    /// (uppercased, spaces/newlines stripped) first.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let text = alphabet::normalize(plaintext);
        let bytes = text.as_bytes();
        let k = self.ranks.len();

        let mut out = Vec::with_capacity(bytes.len());
        for &col in &self.column_order() {
            let mut i = col;
            while i < bytes.len() {
                out.push(bytes[i]);
                i += k;
            }
        }
        String::from_utf8(out).unwrap_or_default()
    }

    /// Inverse of [`encrypt`](Self::encrypt), with remainder-aware column
    /// lengths: when `len % k != 0` the first `len % k` physical columns hold
    /// one extra character. Treating all columns as full-length corrupts the
    /// tail of every text whose length is not a multiple of `k`.
    pub fn decrypt(&self, ciphertext: &str) -> String {
        let text = alphabet::normalize(ciphertext);
        let bytes = text.as_bytes();
        let k = self.ranks.len();
        let len = bytes.len();
        let n_rows = len.div_ceil(k);
        let rem = len % k;

        let col_len = |col: usize| -> usize {
            if rem == 0 || col < rem {
                n_rows
            } else {
                n_rows - 1
            }
        };

        // Ciphertext is consumed in ascending rank order, sized per column.
        let mut columns: Vec<&[u8]> = vec![&[]; k];
        let mut idx = 0;
        for &col in &self.column_order() {
            let take = col_len(col);
            columns[col] = &bytes[idx..idx + take];
            idx += take;
        }

        let mut out = Vec::with_capacity(len);
        for row in 0..n_rows {
            for column in &columns {
                if row < column.len() {
                    out.push(column[row]);
                }
            }
        }
        String::from_utf8(out).unwrap_or_default()
    }
}

impl fmt::Display for TranspositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_keeps_bijection() {
        let mut key = SubstitutionKey::identity();
        key.swap(0, 4);
        key.swap(4, 19);
        let mut seen = [false; ALPHABET_LEN];
        for c in 0..ALPHABET_LEN {
            let p = key.plain_for(c);
            assert!(!seen[p]);
            seen[p] = true;
        }
        // Inverse stays consistent with forward.
        assert_eq!(key.invert().invert(), key);
    }

    #[test]
    fn from_forward_rejects_duplicates() {
        let mut forward = [0u8; ALPHABET_LEN];
        for (i, slot) in forward.iter_mut().enumerate() {
            *slot = i as u8;
        }
        forward[1] = 0; // 'A' used twice
        assert!(SubstitutionKey::from_forward(forward).is_err());
    }

    #[test]
    fn transposition_rejects_non_permutation() {
        assert!(TranspositionKey::new(vec![0, 0, 1]).is_err());
        assert!(TranspositionKey::new(vec![0, 3, 1]).is_err());
        assert!(TranspositionKey::new(vec![]).is_err());
        assert!(TranspositionKey::new(vec![2, 0, 1]).is_ok());
    }

    #[test]
    fn known_columnar_example() {
        // "ATTACKATDAWN" written into 4 columns:
        //   A T T A
        //   C K A T
        //   D A W N
        // Key [1,3,0,2]: rank 0 is column 2, rank 1 is column 0, ...
        let key = TranspositionKey::new(vec![1, 3, 0, 2]).unwrap();
        let ct = key.encrypt("ATTACKATDAWN");
        assert_eq!(ct, "TAWACDATNTKA");
        assert_eq!(key.decrypt(&ct), "ATTACKATDAWN");
    }

    #[test]
    fn decrypt_handles_short_columns() {
        let key = TranspositionKey::new(vec![2, 0, 1]).unwrap();
        for text in ["AB", "ABCD", "ABCDEFG", "ABCDEFGH"] {
            let ct = key.encrypt(text);
            assert_eq!(key.decrypt(&ct), text, "round trip failed for {}", text);
        }
    }
}
