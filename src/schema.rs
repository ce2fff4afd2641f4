table! {
    comments (id) {
        id -> Integer,
        post_id -> Integer,
        name -> Text,
        email -> Text,
        body -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        is_active -> Bool,
    }
}

table! {
    posts (id) {
        id -> Integer,
        title -> Text,
        slug -> Text,
        author_id -> Integer,
        body -> Text,
        published_at -> Timestamp,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        status -> Text,
    }
}

table! {
    users (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

joinable!(comments -> posts (post_id));
joinable!(posts -> users (author_id));

allow_tables_to_appear_in_same_query!(comments, posts, users,);
