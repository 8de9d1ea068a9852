//! Fixed fallback records used when the store is empty or unreachable.

use crate::models::profile::{SOCIAL_INSTAGRAM, SOCIAL_LINKEDIN, SOCIAL_VIMEO};
use crate::models::{Profile, Project, SubProject};

/// The profile shown before the owner has saved one.
pub fn initial_profile() -> Profile {
    Profile {
        name: "Nguyễn Văn A".to_string(),
        role: "Visual Alchemist & Editor".to_string(),
        bio: "Chuyên tạo ra những câu chuyện thị giác đầy cảm xúc. Kết hợp kỹ thuật dựng phim \
              hiện đại với tư duy nghệ thuật độc đáo."
            .to_string(),
        email: "contact@visualalchemi.vn".to_string(),
        hero_video_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
        socials: [SOCIAL_INSTAGRAM, SOCIAL_VIMEO, SOCIAL_LINKEDIN]
            .into_iter()
            .map(|k| (k.to_string(), "#".to_string()))
            .collect(),
    }
}

/// The gallery shown before any project has been stored.
///
/// Order matters: callers return this list as-is, unsorted.
pub fn initial_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            title: "Neon City Drifters".to_string(),
            client: "Urban Wear Co.".to_string(),
            year: "2023".to_string(),
            category: "Commercial".to_string(),
            thumbnail: "https://picsum.photos/800/600?grayscale".to_string(),
            description: "Một chiến dịch quảng cáo năng động tập trung vào văn hóa đường phố đêm. \
                          Sử dụng kỹ thuật glitch và màu neon tương phản cao."
                .to_string(),
            tags: tags(&["Editing", "Color Grading", "VFX"]),
            sub_projects: vec![
                SubProject {
                    id: "s1".to_string(),
                    title: "Main Commercial (30s)".to_string(),
                    video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                    description: None,
                },
                SubProject {
                    id: "s2".to_string(),
                    title: "Social Cut (15s)".to_string(),
                    video_url: String::new(),
                    description: None,
                },
            ],
        },
        Project {
            id: "2".to_string(),
            title: "Ethereal Landscapes".to_string(),
            client: "Travel Vibes".to_string(),
            year: "2024".to_string(),
            category: "Documentary".to_string(),
            thumbnail: "https://picsum.photos/800/800?blur".to_string(),
            description: "Loạt phim tài liệu ngắn khám phá những vùng đất chưa được khai phá tại \
                          Tây Bắc. Nhịp phim chậm, giàu chất thơ."
                .to_string(),
            tags: tags(&["Directing", "Editing", "Sound Design"]),
            sub_projects: Vec::new(),
        },
        Project {
            id: "3".to_string(),
            title: "Cyberpunk Interface".to_string(),
            client: "TechGiant".to_string(),
            year: "2023".to_string(),
            category: "Motion Graphics".to_string(),
            thumbnail: "https://picsum.photos/800/450".to_string(),
            description: "Thiết kế giao diện UI/UX tương lai cho phim ngắn khoa học viễn tưởng."
                .to_string(),
            tags: tags(&["Motion", "3D", "After Effects"]),
            sub_projects: Vec::new(),
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_projects;

    #[test]
    fn seed_projects_are_valid() {
        let projects = initial_projects();
        assert_eq!(projects.len(), 3);
        validate_projects(&projects).expect("seed data must satisfy id invariants");
    }

    #[test]
    fn seed_profile_has_three_socials() {
        let profile = initial_profile();
        assert_eq!(profile.socials.len(), 3);
        assert!(profile.hero_video_url.is_some());
    }
}
