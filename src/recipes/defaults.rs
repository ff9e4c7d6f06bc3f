use uuid::Uuid;

use crate::recipes::repo::{Ingredient, IngredientCategory, Recipe};

fn ingredient(name: &str, quantity: f64, unit: &str, category: IngredientCategory) -> Ingredient {
    Ingredient {
        name: name.into(),
        quantity,
        unit: unit.into(),
        category,
    }
}

/// Starter recipes seeded into every fresh (or corrupted) recipe
/// collection so new users never see an empty book.
pub fn default_recipes() -> Vec<Recipe> {
    use IngredientCategory::*;

    vec![
        Recipe {
            id: Uuid::new_v4(),
            name: "Chicken Stir-Fry".into(),
            ingredients: vec![
                ingredient("Chicken breast", 500.0, "g", MeatAndPoultry),
                ingredient("Broccoli", 2.0, "cups", Vegetables),
                ingredient("Carrots", 2.0, "pieces", Vegetables),
                ingredient("Bell peppers", 2.0, "pieces", Vegetables),
                ingredient("Soy sauce", 3.0, "tbsp", OilsAndVinegars),
                ingredient("Ginger", 1.0, "tbsp", SpicesAndSeasonings),
                ingredient("Garlic", 3.0, "cloves", SpicesAndSeasonings),
                ingredient("Vegetable oil", 2.0, "tbsp", OilsAndVinegars),
            ],
            instructions: vec![
                "Cut chicken into bite-sized pieces".into(),
                "Chop all vegetables".into(),
                "Heat oil in a large wok or skillet".into(),
                "Cook chicken until golden brown".into(),
                "Add vegetables and stir-fry until crisp-tender".into(),
                "Add minced garlic and ginger".into(),
                "Pour in soy sauce and stir well".into(),
                "Cook for additional 2-3 minutes until everything is well combined".into(),
            ],
            preparation_time: 30,
            image_uri: None,
        },
        Recipe {
            id: Uuid::new_v4(),
            name: "Vegetable Quinoa Bowl".into(),
            ingredients: vec![
                ingredient("Quinoa", 1.0, "cup", GrainsAndPasta),
                ingredient("Sweet potato", 1.0, "piece", Vegetables),
                ingredient("Chickpeas", 1.0, "can", CannedAndJarred),
                ingredient("Kale", 2.0, "cups", Vegetables),
                ingredient("Avocado", 1.0, "piece", Vegetables),
                ingredient("Olive oil", 2.0, "tbsp", OilsAndVinegars),
                ingredient("Lemon", 1.0, "piece", Fruits),
                ingredient("Cumin", 1.0, "tsp", SpicesAndSeasonings),
            ],
            instructions: vec![
                "Cook quinoa according to package instructions".into(),
                "Cube and roast sweet potato with olive oil and cumin".into(),
                "Drain and rinse chickpeas".into(),
                "Wash and chop kale".into(),
                "Slice avocado".into(),
                "Combine all ingredients in a bowl".into(),
                "Drizzle with olive oil and lemon juice".into(),
                "Season to taste".into(),
            ],
            preparation_time: 35,
            image_uri: None,
        },
        Recipe {
            id: Uuid::new_v4(),
            name: "Spaghetti Carbonara".into(),
            ingredients: vec![
                ingredient("Spaghetti", 400.0, "g", GrainsAndPasta),
                ingredient("Eggs", 3.0, "pieces", Dairy),
                ingredient("Parmesan cheese", 100.0, "g", Dairy),
                ingredient("Pancetta", 150.0, "g", MeatAndPoultry),
                ingredient("Black pepper", 1.0, "tsp", SpicesAndSeasonings),
                ingredient("Salt", 1.0, "tsp", SpicesAndSeasonings),
                ingredient("Garlic", 2.0, "cloves", SpicesAndSeasonings),
            ],
            instructions: vec![
                "Bring a large pot of salted water to boil".into(),
                "Cook spaghetti according to package instructions".into(),
                "While pasta cooks, whisk eggs and grated parmesan in a bowl".into(),
                "Dice pancetta and cook until crispy".into(),
                "Add minced garlic to pancetta".into(),
                "Reserve 1 cup of pasta water before draining".into(),
                "Toss hot pasta with egg mixture and pancetta".into(),
                "Add pasta water as needed for creamy consistency".into(),
                "Season with black pepper and serve immediately".into(),
            ],
            preparation_time: 25,
            image_uri: None,
        },
    ]
}
