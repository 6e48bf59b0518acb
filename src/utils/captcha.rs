use rand::Rng;

// 去掉 0/O、1/I/L 等易混淆字符
const CAPTCHA_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
pub const CAPTCHA_LENGTH: usize = 6;

/// 生成 6 位验证码
pub fn generate_captcha_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CAPTCHA_LENGTH)
        .map(|_| CAPTCHA_ALPHABET[rng.gen_range(0..CAPTCHA_ALPHABET.len())] as char)
        .collect()
}

/// 把验证码渲染成带干扰线的 SVG，前端直接内嵌显示
pub fn render_captcha_svg(code: &str) -> String {
    const WIDTH: i32 = 160;
    const HEIGHT: i32 = 50;
    let mut rng = rand::thread_rng();
    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}"><rect width="100%" height="100%" fill="#f4f4f4"/>"##
    );

    for _ in 0..5 {
        svg.push_str(&format!(
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#{:06x}" stroke-width="1"/>"##,
            rng.gen_range(0..WIDTH),
            rng.gen_range(0..HEIGHT),
            rng.gen_range(0..WIDTH),
            rng.gen_range(0..HEIGHT),
            rng.gen_range(0x777777..=0xbbbbbb),
        ));
    }

    for (i, ch) in code.chars().enumerate() {
        let x = 14 + i as i32 * 24;
        let y = rng.gen_range(30..40);
        let rotate = rng.gen_range(-25..=25);
        svg.push_str(&format!(
            r##"<text x="{x}" y="{y}" font-family="monospace" font-size="28" font-weight="bold" fill="#{:06x}" transform="rotate({rotate} {x} {y})">{ch}</text>"##,
            rng.gen_range(0x111111..=0x555555),
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_captcha_code() {
        let code = generate_captcha_code();
        assert_eq!(code.len(), CAPTCHA_LENGTH);
        assert!(code.bytes().all(|b| CAPTCHA_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_render_contains_every_character() {
        let svg = render_captcha_svg("AB23CD");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        for ch in "AB23CD".chars() {
            assert!(svg.contains(&format!(">{ch}</text>")));
        }
    }
}
