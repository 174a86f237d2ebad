table! {
    posts (id) {
        id -> Int4,
        title -> Text,
        body -> Text,
        user_id -> Int4,
    }
}

table! {
    users (id) {
        id -> Int4,
        name -> Text,
        username -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        website -> Nullable<Text>,
        address -> Nullable<Jsonb>,
        company -> Nullable<Jsonb>,
    }
}

joinable!(posts -> users (user_id));
allow_tables_to_appear_in_same_query!(posts, users);
