diesel::table! {
    users (id) {
        id -> Text,
        username -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    categories (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    subcategories (id) {
        id -> Text,
        user_id -> Text,
        category_id -> Text,
        name -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    expenses (id) {
        id -> Text,
        user_id -> Text,
        date -> Date,
        vendor -> Text,
        amount -> Text,
        category -> Text,
        subcategory -> Text,
        exclude -> Bool,
        indispensable -> Bool,
        avoidable -> Bool,
        notes -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::joinable!(categories -> users (user_id));
diesel::joinable!(subcategories -> categories (category_id));
diesel::joinable!(expenses -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, categories, subcategories, expenses,);
