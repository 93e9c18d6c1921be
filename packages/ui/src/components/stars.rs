use dioxus::prelude::*;
use store::reviews::{star_fills, StarFill};

use crate::icons::{FaStar, FaStarHalfStroke};
use crate::Icon;

fn star_class(fill: StarFill) -> &'static str {
    match fill {
        StarFill::Full => "star star--full",
        StarFill::Half => "star star--half",
        StarFill::Empty => "star star--empty",
    }
}

/// Five gold stars for a 0–5 rating, with half stars.
#[component]
pub fn StarRating(rating: f64, #[props(default = 14)] size: u32) -> Element {
    rsx! {
        span {
            class: "stars",
            title: "{rating:.1}",
            for (i, fill) in star_fills(rating).into_iter().enumerate() {
                span {
                    key: "{i}",
                    class: star_class(fill),
                    if fill == StarFill::Half {
                        Icon { icon: FaStarHalfStroke, width: size, height: size }
                    } else {
                        Icon { icon: FaStar, width: size, height: size }
                    }
                }
            }
        }
    }
}
