//! The C type descriptor, the target-name mapping, integer promotion, and
//! the usual arithmetic conversions (spec §3.1, §4.1).

use crate::config::{TranslationConfig, WordWidth};
use crate::error::TranslateError;
use cc2rs_ast::TypeSpecifier;
use serde::{Deserialize, Serialize};

/// Integer signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Signedness {
    /// `signed`
    Signed,
    /// `unsigned`
    Unsigned,
}

/// Integer bit width. Ordered narrowest-to-widest so usual-conversion
/// tie-breaking (spec §4.1) can compare widths with `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntWidth {
    /// 8 bits (`char`).
    Eight,
    /// 16 bits (`short`).
    Sixteen,
    /// 32 bits (`int`, the default).
    ThirtyTwo,
    /// The target's pointer-sized width (`long`).
    Word,
}

/// Floating-point width. `SixtyFour` compares greater than `ThirtyTwo` so
/// `max` picks the wider float (spec §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloatWidth {
    /// `float`
    ThirtyTwo,
    /// `double`
    SixtyFour,
}

/// The C type descriptor (spec §3.1).
///
/// Every non-void value the expression translator produces carries
/// [`CType::Integer`] or [`CType::Float`]; [`CType::Void`] only appears as
/// the result of statement-expressions or the explicit `void` keyword.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CType {
    /// A signed or unsigned integer at one of the four admitted widths.
    Integer {
        /// Signedness.
        signedness: Signedness,
        /// Bit width.
        width: IntWidth,
    },
    /// An IEEE float at 32 or 64 bits.
    Float(FloatWidth),
    /// `void`.
    Void,
    /// A function returning `T`. Parameter types are not part of the
    /// descriptor; call sites trust the call syntax (spec §3.1).
    Function {
        /// The function's return type.
        returns: Box<CType>,
    },
}

impl CType {
    /// The canonical signed 32-bit `int` — C's default type and the type
    /// every integer literal and boolean coercion carries.
    pub fn signed_int() -> Self {
        CType::Integer {
            signedness: Signedness::Signed,
            width: IntWidth::ThirtyTwo,
        }
    }

    /// True if this is an [`CType::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, CType::Integer { .. })
    }

    /// True if this is a [`CType::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, CType::Float(_))
    }

    /// The target Rust type name for this C type (spec §4.1's mapping
    /// table). Errors on [`CType::Function`], which has no value-type
    /// spelling.
    pub fn target_name(&self) -> Result<String, TranslateError> {
        let name = match self {
            CType::Integer {
                signedness: Signedness::Signed,
                width: IntWidth::Eight,
            } => "i8",
            CType::Integer {
                signedness: Signedness::Signed,
                width: IntWidth::Sixteen,
            } => "i16",
            CType::Integer {
                signedness: Signedness::Signed,
                width: IntWidth::ThirtyTwo,
            } => "i32",
            CType::Integer {
                signedness: Signedness::Signed,
                width: IntWidth::Word,
            } => "isize",
            CType::Integer {
                signedness: Signedness::Unsigned,
                width: IntWidth::Eight,
            } => "u8",
            CType::Integer {
                signedness: Signedness::Unsigned,
                width: IntWidth::Sixteen,
            } => "u16",
            CType::Integer {
                signedness: Signedness::Unsigned,
                width: IntWidth::ThirtyTwo,
            } => "u32",
            CType::Integer {
                signedness: Signedness::Unsigned,
                width: IntWidth::Word,
            } => "usize",
            CType::Float(FloatWidth::ThirtyTwo) => "f32",
            CType::Float(FloatWidth::SixtyFour) => "f64",
            CType::Void => "()",
            CType::Function { .. } => return Err(TranslateError::UnmappedFunctionType),
        };
        Ok(name.to_string())
    }

    /// The type's width in bits under the given target configuration.
    ///
    /// This is informational only (used by diagnostics and the metrics
    /// ambient feature): it never changes which Rust type name is emitted,
    /// since `word` always maps to `isize`/`usize` regardless of the
    /// target's actual pointer width (spec §4.1).
    pub fn bits(&self, config: &TranslationConfig) -> Option<u32> {
        match self {
            CType::Integer { width, .. } => Some(match width {
                IntWidth::Eight => 8,
                IntWidth::Sixteen => 16,
                IntWidth::ThirtyTwo => 32,
                IntWidth::Word => match config.word_width {
                    WordWidth::ThirtyTwo => 32,
                    WordWidth::SixtyFour => 64,
                },
            }),
            CType::Float(FloatWidth::ThirtyTwo) => Some(32),
            CType::Float(FloatWidth::SixtyFour) => Some(64),
            CType::Void | CType::Function { .. } => None,
        }
    }
}

/// Fold a sequence of type-specifier tokens, right-to-left, onto a default
/// of signed 32-bit `int` (spec §4.1).
///
/// `signed`/`unsigned` set signedness, preserving width; `char`/`short`/
/// `int`/`long` set width; `float`/`double`/`void` replace the accumulator
/// outright. A second `long` (as in `long long`) has no distinct effect —
/// see DESIGN.md's Open Question resolution. Any other specifier is a
/// fatal [`TranslateError::UnsupportedTypeSpecifier`].
pub fn fold_type_specifiers(specifiers: &[TypeSpecifier]) -> Result<CType, TranslateError> {
    enum Kind {
        Integer,
        Float32,
        Float64,
        Void,
    }

    let mut kind = Kind::Integer;
    let mut signedness = Signedness::Signed;
    let mut width = IntWidth::ThirtyTwo;

    for specifier in specifiers {
        match specifier {
            TypeSpecifier::Signed => signedness = Signedness::Signed,
            TypeSpecifier::Unsigned => signedness = Signedness::Unsigned,
            TypeSpecifier::Char => width = IntWidth::Eight,
            TypeSpecifier::Short => width = IntWidth::Sixteen,
            TypeSpecifier::Int => width = IntWidth::ThirtyTwo,
            TypeSpecifier::Long => width = IntWidth::Word,
            TypeSpecifier::Float => kind = Kind::Float32,
            TypeSpecifier::Double => kind = Kind::Float64,
            TypeSpecifier::Void => kind = Kind::Void,
            TypeSpecifier::Other(token) => {
                return Err(TranslateError::UnsupportedTypeSpecifier(token.clone()))
            }
        }
    }

    Ok(match kind {
        Kind::Integer => CType::Integer { signedness, width },
        Kind::Float32 => CType::Float(FloatWidth::ThirtyTwo),
        Kind::Float64 => CType::Float(FloatWidth::SixtyFour),
        Kind::Void => CType::Void,
    })
}

/// Integer promotion (C99 §6.3.1.1 ¶2, spec §4.1): any integer narrower
/// than 32 bits becomes signed 32-bit; everything else, including
/// word-width integers, is unchanged.
pub fn promote(ty: CType) -> CType {
    match ty {
        CType::Integer {
            width: IntWidth::Eight | IntWidth::Sixteen,
            ..
        } => CType::signed_int(),
        other => other,
    }
}

/// The usual arithmetic conversions (C99 §6.3.1.8, spec §4.1): pick the
/// common type of two operand types.
///
/// Commutative by construction — callers never need to try both argument
/// orders.
pub fn usual_arithmetic_conversions(a: &CType, b: &CType) -> CType {
    use std::cmp::Ordering;

    match (a, b) {
        (CType::Float(wa), CType::Float(wb)) => CType::Float(*wa.max(wb)),
        (CType::Float(w), _) | (_, CType::Float(w)) => CType::Float(*w),
        _ => {
            let pa = promote(a.clone());
            let pb = promote(b.clone());
            if pa == pb {
                return pa;
            }
            match (&pa, &pb) {
                (
                    CType::Integer {
                        signedness: sa,
                        width: wa,
                    },
                    CType::Integer {
                        signedness: sb,
                        width: wb,
                    },
                ) => {
                    if sa == sb {
                        CType::Integer {
                            signedness: *sa,
                            width: (*wa).max(*wb),
                        }
                    } else {
                        match wa.cmp(wb) {
                            Ordering::Equal => CType::Integer {
                                signedness: Signedness::Unsigned,
                                width: *wa,
                            },
                            Ordering::Greater => pa,
                            Ordering::Less => pb,
                        }
                    }
                }
                _ => unreachable!(
                    "usual_arithmetic_conversions only admits Integer/Float operands, got {pa:?} and {pb:?}"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed(width: IntWidth) -> CType {
        CType::Integer {
            signedness: Signedness::Signed,
            width,
        }
    }

    fn unsigned(width: IntWidth) -> CType {
        CType::Integer {
            signedness: Signedness::Unsigned,
            width,
        }
    }

    #[test]
    fn target_name_mapping_table() {
        assert_eq!(signed(IntWidth::Eight).target_name().unwrap(), "i8");
        assert_eq!(signed(IntWidth::Sixteen).target_name().unwrap(), "i16");
        assert_eq!(signed(IntWidth::ThirtyTwo).target_name().unwrap(), "i32");
        assert_eq!(signed(IntWidth::Word).target_name().unwrap(), "isize");
        assert_eq!(unsigned(IntWidth::Eight).target_name().unwrap(), "u8");
        assert_eq!(unsigned(IntWidth::Sixteen).target_name().unwrap(), "u16");
        assert_eq!(unsigned(IntWidth::ThirtyTwo).target_name().unwrap(), "u32");
        assert_eq!(unsigned(IntWidth::Word).target_name().unwrap(), "usize");
        assert_eq!(CType::Float(FloatWidth::ThirtyTwo).target_name().unwrap(), "f32");
        assert_eq!(CType::Float(FloatWidth::SixtyFour).target_name().unwrap(), "f64");
        assert_eq!(CType::Void.target_name().unwrap(), "()");
    }

    #[test]
    fn function_type_has_no_target_name() {
        let ty = CType::Function {
            returns: Box::new(CType::signed_int()),
        };
        assert_eq!(ty.target_name(), Err(TranslateError::UnmappedFunctionType));
    }

    #[test]
    fn bare_char_defaults_to_signed() {
        let ty = fold_type_specifiers(&[TypeSpecifier::Char]).unwrap();
        assert_eq!(ty, signed(IntWidth::Eight));
    }

    #[test]
    fn long_maps_to_word_width() {
        let ty = fold_type_specifiers(&[TypeSpecifier::Long]).unwrap();
        assert_eq!(ty, signed(IntWidth::Word));
    }

    #[test]
    fn specifier_order_is_irrelevant() {
        let a = fold_type_specifiers(&[TypeSpecifier::Unsigned, TypeSpecifier::Short]).unwrap();
        let b = fold_type_specifiers(&[TypeSpecifier::Short, TypeSpecifier::Unsigned]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, unsigned(IntWidth::Sixteen));
    }

    #[test]
    fn unknown_specifier_is_an_error() {
        let err =
            fold_type_specifiers(&[TypeSpecifier::Other("_Bool".to_string())]).unwrap_err();
        assert_eq!(err, TranslateError::UnsupportedTypeSpecifier("_Bool".to_string()));
    }

    #[test]
    fn float_and_double_specifiers() {
        assert_eq!(
            fold_type_specifiers(&[TypeSpecifier::Float]).unwrap(),
            CType::Float(FloatWidth::ThirtyTwo)
        );
        assert_eq!(
            fold_type_specifiers(&[TypeSpecifier::Double]).unwrap(),
            CType::Float(FloatWidth::SixtyFour)
        );
    }

    #[test]
    fn promote_widens_narrow_integers() {
        assert_eq!(promote(signed(IntWidth::Eight)), signed(IntWidth::ThirtyTwo));
        assert_eq!(promote(unsigned(IntWidth::Sixteen)), signed(IntWidth::ThirtyTwo));
    }

    #[test]
    fn promote_leaves_32_bit_and_word_unchanged() {
        assert_eq!(promote(unsigned(IntWidth::ThirtyTwo)), unsigned(IntWidth::ThirtyTwo));
        assert_eq!(promote(unsigned(IntWidth::Word)), unsigned(IntWidth::Word));
    }

    #[test]
    fn promote_is_idempotent() {
        for ty in [
            signed(IntWidth::Eight),
            signed(IntWidth::Sixteen),
            signed(IntWidth::ThirtyTwo),
            unsigned(IntWidth::Word),
            CType::Float(FloatWidth::ThirtyTwo),
            CType::Void,
        ] {
            assert_eq!(promote(promote(ty.clone())), promote(ty));
        }
    }

    #[test]
    fn mixing_signed_and_unsigned_int_yields_unsigned_32() {
        let result = usual_arithmetic_conversions(&signed(IntWidth::ThirtyTwo), &unsigned(IntWidth::ThirtyTwo));
        assert_eq!(result, unsigned(IntWidth::ThirtyTwo));
    }

    #[test]
    fn mixing_signed_32_with_unsigned_word_yields_unsigned_word() {
        let result = usual_arithmetic_conversions(&signed(IntWidth::ThirtyTwo), &unsigned(IntWidth::Word));
        assert_eq!(result, unsigned(IntWidth::Word));
        let flipped = usual_arithmetic_conversions(&unsigned(IntWidth::Word), &signed(IntWidth::ThirtyTwo));
        assert_eq!(flipped, unsigned(IntWidth::Word));
    }

    #[test]
    fn float_beats_integer() {
        let result = usual_arithmetic_conversions(&signed(IntWidth::ThirtyTwo), &CType::Float(FloatWidth::ThirtyTwo));
        assert_eq!(result, CType::Float(FloatWidth::ThirtyTwo));
    }

    #[test]
    fn wider_float_wins() {
        let result = usual_arithmetic_conversions(
            &CType::Float(FloatWidth::ThirtyTwo),
            &CType::Float(FloatWidth::SixtyFour),
        );
        assert_eq!(result, CType::Float(FloatWidth::SixtyFour));
    }

    #[test]
    fn usual_conversions_are_commutative() {
        let cases = [
            (signed(IntWidth::Eight), unsigned(IntWidth::Sixteen)),
            (signed(IntWidth::ThirtyTwo), unsigned(IntWidth::ThirtyTwo)),
            (signed(IntWidth::Word), unsigned(IntWidth::ThirtyTwo)),
            (CType::Float(FloatWidth::ThirtyTwo), signed(IntWidth::Word)),
            (CType::Float(FloatWidth::SixtyFour), CType::Float(FloatWidth::ThirtyTwo)),
        ];
        for (a, b) in cases {
            assert_eq!(
                usual_arithmetic_conversions(&a, &b),
                usual_arithmetic_conversions(&b, &a),
            );
        }
    }

    #[test]
    fn bits_reflects_word_width_config() {
        let thirty_two = TranslationConfig {
            word_width: WordWidth::ThirtyTwo,
        };
        let sixty_four = TranslationConfig {
            word_width: WordWidth::SixtyFour,
        };
        let word = signed(IntWidth::Word);
        assert_eq!(word.bits(&thirty_two), Some(32));
        assert_eq!(word.bits(&sixty_four), Some(64));
        assert_eq!(CType::Void.bits(&sixty_four), None);
    }
}
