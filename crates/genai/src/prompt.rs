/// Build the prompt asking for a short Vietnamese project description.
///
/// `keywords` is the project's tags joined with `", "`.
pub fn description_prompt(title: &str, keywords: &str) -> String {
    format!(
        "Bạn là một chuyên gia nội dung cho portfolio của Editor/Videographer chuyên nghiệp.\n\
         Hãy viết một đoạn mô tả ngắn gọn (khoảng 3-4 câu), hấp dẫn, chuyên nghiệp bằng Tiếng Việt \
         cho dự án sau:\n\
         \n\
         Tên dự án: {title}\n\
         Từ khóa/Kỹ thuật: {keywords}\n\
         \n\
         Văn phong: Hiện đại, nghệ thuật, tập trung vào kỹ thuật dựng và cảm xúc hình ảnh.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_title_and_keywords() {
        let prompt = description_prompt("Neon City Drifters", "Editing, VFX");
        assert!(prompt.contains("Tên dự án: Neon City Drifters\n"));
        assert!(prompt.contains("Từ khóa/Kỹ thuật: Editing, VFX\n"));
        assert!(prompt.contains("3-4 câu"));
    }
}
