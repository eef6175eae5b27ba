use super::types::{
    Achievement, AchievementCategory, Goal, GoalType, IconName, SiteContent, Skill, Testimonial,
};

// First-run defaults written to an empty database, carried over from the
// site's original content. Seed records leave their ids empty; the store
// assigns identifiers when the batch is written.

pub fn default_content() -> SiteContent {
    SiteContent {
        hero_name: "محمد عبدالرحمن الزايدي".to_string(),
        hero_role: "الأول متوسط – مدارس الاندلس الاهليه".to_string(),
        about_text: "طالب طموح وشغوف بالتعلم، أسعى لاستكشاف عالم الأسواق المالية وتكنولوجيا المعلومات لمساعدة الآخرين على فهم التداول بأسلوب مبتكر وآمن.".to_string(),
        contact_email: "alzaydy901@gmail.com".to_string(),
    }
}

pub fn achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            id: String::new(),
            title: "إنشاء موقع إلكتروني".to_string(),
            description: "قمت بتصميم وبرمجة هذا الموقع بنفسي ليكون بوابتي لمشاركة إنجازاتي وأهدافي مع العالم.".to_string(),
            year: "2024".to_string(),
            category: AchievementCategory::Academic,
            image: "https://picsum.photos/seed/coding/600/400".to_string(),
        },
        Achievement {
            id: String::new(),
            title: "مساعدة كبار السن في الحي".to_string(),
            description: "أقوم بمساعدة كبار السن في حيي في مهام بسيطة مثل عبور الشارع أو حمل المشتريات. هذا العمل علمني أهمية العطاء والاحترام.".to_string(),
            year: "2023".to_string(),
            category: AchievementCategory::Volunteering,
            image: "https://picsum.photos/seed/elderly/600/400".to_string(),
        },
        Achievement {
            id: String::new(),
            title: "الفوز في مسابقة رياضية".to_string(),
            description: "فزت بالمركز الأول في بطولة كرة القدم المدرسية بعد منافسة قوية، مما علمني أهمية العمل الجماعي.".to_string(),
            year: "2024".to_string(),
            category: AchievementCategory::Personal,
            image: "https://picsum.photos/seed/running/600/400".to_string(),
        },
    ]
}

pub fn skills() -> Vec<Skill> {
    vec![
        Skill {
            id: String::new(),
            name: "السرعة".to_string(),
            icon_name: IconName::Zap,
        },
        Skill {
            id: String::new(),
            name: "الذكاء".to_string(),
            icon_name: IconName::Brain,
        },
    ]
}

pub fn hobbies() -> Vec<Skill> {
    vec![
        Skill {
            id: String::new(),
            name: "كرة القدم".to_string(),
            icon_name: IconName::Footprints,
        },
        Skill {
            id: String::new(),
            name: "التبادل".to_string(),
            icon_name: IconName::Sword,
        },
        Skill {
            id: String::new(),
            name: "ريادة الأعمال".to_string(),
            icon_name: IconName::Briefcase,
        },
    ]
}

pub fn goals() -> Vec<Goal> {
    vec![
        Goal {
            id: String::new(),
            kind: GoalType::Long,
            title: "طويلة المدى".to_string(),
            description: "إنشاء منصة تعليمية متكاملة تساعد الشباب على تعلم التداول بأمان وذكاء.".to_string(),
        },
        Goal {
            id: String::new(),
            kind: GoalType::Short,
            title: "قصيرة المدى".to_string(),
            description: "تعلم أساسيات التداول والاستثمار بشكل أعمق.".to_string(),
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            id: String::new(),
            name: "أ. أحمد المصري".to_string(),
            role: "الرياضيات".to_string(),
            comment: "محمد طالب مجتهد ويظهر فهماً عميقاً للمفاهيم الرياضية. لديه قدرة ممتازة على حل المشكلات.".to_string(),
            image: "https://picsum.photos/seed/t1/100/100".to_string(),
        },
        Testimonial {
            id: String::new(),
            name: "أ. فاطمة علي".to_string(),
            role: "العلوم".to_string(),
            comment: "يتمتع بشغف كبير للاستكشاف والتعلم. دائماً ما يطرح أسئلة ذكية ويشارك بفعالية.".to_string(),
            image: "https://picsum.photos/seed/t2/100/100".to_string(),
        },
        Testimonial {
            id: String::new(),
            name: "أ. خالد عبدالله".to_string(),
            role: "اللغة العربية".to_string(),
            comment: "يمتلك موهبة في التعبير والكتابة، وأعماله دائماً ما تكون مدروسة ومنظمة بشكل جيد.".to_string(),
            image: "https://picsum.photos/seed/t3/100/100".to_string(),
        },
    ]
}
