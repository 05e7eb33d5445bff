use entity::prelude::*;

/// Case-insensitive substring match over the title, the description and
/// every comment. A blank query matches everything.
pub fn matches(post: &PostEntity, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&query);

    contains(&post.title)
        || contains(&post.description)
        || post.comments.iter().any(|c| contains(&c.text))
}

pub fn filter<'a>(posts: &'a [PostEntity], query: &str) -> Vec<&'a PostEntity> {
    posts.iter().filter(|post| matches(post, query)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn post(title: &str, description: &str, comments: &[&str]) -> PostEntity {
        PostEntity {
            title: title.to_string(),
            description: description.to_string(),
            comments: comments
                .iter()
                .map(|text| CommentEntity {
                    text: text.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let post = post("Anything", "", &[]);

        assert!(matches(&post, ""));
        assert!(matches(&post, "   "));
    }

    #[test]
    fn test_matches_title_description_and_comments() {
        let post = post(
            "Scholarship Tips",
            "Deadlines are in March",
            &["Ask the FINANCIAL aid office"],
        );

        assert!(matches(&post, "scholarship"));
        assert!(matches(&post, "MARCH"));
        assert!(matches(&post, "financial aid"));
        assert!(!matches(&post, "internship"));
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_query() {
        let tipsy = post("Tipsy", "", &[]);
        let tips = post("Study tips for finals", "", &[]);

        assert!(!matches(&tipsy, "tips "));
        assert!(matches(&tips, "tips "));
        assert!(!matches(&tipsy, " tips"));
        assert!(matches(&tips, " TIPS "));
    }

    #[test]
    fn test_filter_keeps_order() {
        let posts = vec![
            post("resume review", "", &[]),
            post("mock interviews", "", &["bring your resume"]),
            post("study hall", "", &[]),
        ];

        let found: Vec<_> =
            filter(&posts, "Resume").iter().map(|p| p.title.as_str()).collect();

        assert_eq!(found, vec!["resume review", "mock interviews"]);
    }
}
