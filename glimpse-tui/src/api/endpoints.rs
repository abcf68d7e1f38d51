//! Endpoint paths, relative to the configured base URL.

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

pub const ALL_IMAGES: &str = "/images/getAll";
pub const LIKE: &str = "/likes/like";
pub const UNLIKE: &str = "/likes/unLike";
pub const CREATE_POST: &str = "/posts/createPost";

pub fn image(image_id: &str) -> String {
    format!("/images/{}", segment(image_id))
}

pub fn likes_for_post(post_id: &str) -> String {
    format!("/count/likes-for-post/{}", segment(post_id))
}

pub fn comments_for_post(post_id: &str) -> String {
    format!("/count/comments-for-post/{}", segment(post_id))
}

pub fn user_likes(user_id: &str) -> String {
    format!("/user-likes/{}", segment(user_id))
}

pub fn posts_by_username(username: &str) -> String {
    format!("/posts/getAllByUsername/{}", segment(username))
}

pub fn update_post(post_id: &str) -> String {
    format!("/posts/updatePost/{}", segment(post_id))
}

pub fn delete_post(post_id: &str) -> String {
    format!("/posts/deletePost/{}", segment(post_id))
}

pub fn follower_count(username: &str) -> String {
    format!("/count/followers/{}", segment(username))
}

pub fn following_count(username: &str) -> String {
    format!("/count/following/{}", segment(username))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(image("a1"), "/images/a1");
        assert_eq!(likes_for_post("p1"), "/count/likes-for-post/p1");
        assert_eq!(comments_for_post("p1"), "/count/comments-for-post/p1");
        assert_eq!(user_likes("u1"), "/user-likes/u1");
        assert_eq!(update_post("p1"), "/posts/updatePost/p1");
        assert_eq!(delete_post("p1"), "/posts/deletePost/p1");
    }

    #[test]
    fn test_username_is_encoded() {
        assert_eq!(posts_by_username("ana maria"), "/posts/getAllByUsername/ana%20maria");
        assert_eq!(follower_count("a/b"), "/count/followers/a%2Fb");
    }
}
