// ABOUTME: Response schemas declared for recipe generation and meal parsing
// ABOUTME: The recipe schema is strict; the meal schema leaves every field optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::llm::schema::ResponseSchema;

const DIFFICULTIES: &[&str] = &["Easy", "Medium", "Hard"];
const MEAL_TYPES: &[&str] = &["breakfast", "lunch", "dinner", "snack"];

fn amount(description: &str) -> ResponseSchema {
    ResponseSchema::number()
        .with_minimum(0.0)
        .describe(description)
}

/// Schema every recipe response must satisfy
#[must_use]
pub fn recipe_schema() -> ResponseSchema {
    let nutrition = ResponseSchema::object()
        .required("calories", amount("Energy per serving in kcal"))
        .required("protein", amount("Protein per serving in grams"))
        .required("carbs", amount("Carbohydrates per serving in grams"))
        .required("fat", amount("Fat per serving in grams"))
        .optional("fiber", amount("Fiber per serving in grams"))
        .optional("sodium", amount("Sodium per serving in milligrams"));

    ResponseSchema::object()
        .required("title", ResponseSchema::string().with_min_length(1))
        .required("description", ResponseSchema::string())
        .required(
            "ingredients",
            ResponseSchema::array(ResponseSchema::string())
                .describe("Ingredient lines including amounts"),
        )
        .required(
            "instructions",
            ResponseSchema::array(ResponseSchema::string())
                .with_min_items(1)
                .describe("Ordered cooking steps"),
        )
        .required("nutrition", nutrition)
        .required(
            "timeEstimate",
            ResponseSchema::string().describe("Total time, e.g. \"25 minutes\""),
        )
        .required("difficulty", ResponseSchema::string_enum(DIFFICULTIES))
}

/// Schema for meal parsing; all fields may be missing
#[must_use]
pub fn meal_parse_schema() -> ResponseSchema {
    let nutrition = ResponseSchema::object()
        .optional("calories", amount("Estimated energy in kcal"))
        .optional("protein", amount("Estimated protein in grams"))
        .optional("carbs", amount("Estimated carbohydrates in grams"))
        .optional("fat", amount("Estimated fat in grams"));

    ResponseSchema::object()
        .optional(
            "title",
            ResponseSchema::string().describe("Short name for the meal"),
        )
        .optional("type", ResponseSchema::string_enum(MEAL_TYPES))
        .optional("nutrition", nutrition)
}
