use super::Product;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The catalog seeded into every store at startup, in id order
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Radiance Face Cream".to_string(),
            description: "Hydrating moisturizer for all skin types".to_string(),
            category: "moisturizer".to_string(),
            image_url: "https://images.unsplash.com/photo-1612817288484-6f916006741a".to_string(),
            price: 2999,
            benefits: strings(&["Hydration", "Brightening", "Anti-aging"]),
            ingredients: strings(&["Hyaluronic Acid", "Vitamin C", "Peptides"]),
            suitable_for: strings(&["Dry Skin", "Normal Skin", "Combination Skin"]),
            match_score: None,
        },
        Product {
            id: 2,
            name: "Natural Glow Serum".to_string(),
            description: "Vitamin C enriched brightening serum".to_string(),
            category: "serum".to_string(),
            image_url: "https://images.unsplash.com/photo-1515688594390-b649af70d282".to_string(),
            price: 3499,
            benefits: strings(&["Brightening", "Even Tone", "Antioxidant Protection"]),
            ingredients: strings(&["Vitamin C", "Niacinamide", "Green Tea Extract"]),
            suitable_for: strings(&["All Skin Types", "Dull Skin", "Hyperpigmentation"]),
            match_score: None,
        },
        Product {
            id: 3,
            name: "Gentle Cleansing Foam".to_string(),
            description: "pH balanced facial cleanser".to_string(),
            category: "cleanser".to_string(),
            image_url: "https://images.unsplash.com/photo-1608068811588-3a67006b7489".to_string(),
            price: 1999,
            benefits: strings(&["Gentle Cleansing", "pH Balanced", "Non-drying"]),
            ingredients: strings(&["Glycerin", "Chamomile", "Aloe Vera"]),
            suitable_for: strings(&["Sensitive Skin", "All Skin Types"]),
            match_score: None,
        },
        Product {
            id: 4,
            name: "Youth Restore Night Cream".to_string(),
            description: "Anti-aging night treatment".to_string(),
            category: "moisturizer".to_string(),
            image_url: "https://images.unsplash.com/photo-1586220742613-b731f66f7743".to_string(),
            price: 4999,
            benefits: strings(&["Anti-aging", "Skin Repair", "Moisture Barrier Support"]),
            ingredients: strings(&["Retinol", "Ceramides", "Peptides"]),
            suitable_for: strings(&["Mature Skin", "Fine Lines", "Dry Skin"]),
            match_score: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_products_have_sequential_ids() {
        let ids: Vec<i32> = sample_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sample_products_are_unscored() {
        assert!(sample_products().iter().all(|p| p.match_score.is_none()));
    }
}
