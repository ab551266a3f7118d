mod analysis;
mod catalog;
mod product;

pub use analysis::{Analysis, FacialAnalysis, FacialFeatures, NewAnalysis, Recommendation};
pub use catalog::sample_products;
pub use product::Product;
