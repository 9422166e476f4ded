//! Built-in course catalog

use crate::models::{Course, Lesson, QuizQuestion};

fn question(question: &str, options: [&str; 4], answer_index: usize) -> QuizQuestion {
    QuizQuestion {
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer_index,
    }
}

fn lesson(
    id: &str,
    title: &str,
    duration: &str,
    image_url: &str,
    content: &str,
    quiz: Vec<QuizQuestion>,
) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        duration: duration.to_string(),
        image_url: Some(image_url.to_string()),
        quiz,
    }
}

/// All courses shipped with the app, in learning-path order
pub fn courses() -> Vec<Course> {
    vec![
        Course {
            id: "intro-ai".to_string(),
            title: "Foundations of AI".to_string(),
            description: "Master the fundamental building blocks of intelligence in the digital age."
                .to_string(),
            icon: "🧠".to_string(),
            color: "bg-blue-100 text-blue-600".to_string(),
            lessons: vec![
                lesson(
                    "what-is-ai",
                    "The Spark of Logic",
                    "5 min",
                    "https://images.unsplash.com/photo-1620712943543-bcc4628c9759?auto=format&fit=crop&q=80&w=1200",
                    "AI isn't magic; it's the art of teaching machines to recognize patterns. \
                     While a calculator follows strict rules, an AI model explores a universe of \
                     data to make predictions.",
                    vec![question(
                        "How does AI differ from traditional software?",
                        [
                            "It uses faster electricity",
                            "It learns from data patterns",
                            "It is always 100% correct",
                            "It only works on robots",
                        ],
                        1,
                    )],
                ),
                lesson(
                    "neural-nets",
                    "Neural Architecture",
                    "10 min",
                    "https://images.unsplash.com/photo-1509228468518-180dd4864904?auto=format&fit=crop&q=80&w=1200",
                    "Modern AI is inspired by the human brain. Neural networks are layers of \
                     digital neurons; adjusting the weights between them lets the machine improve \
                     with every example it sees.",
                    vec![question(
                        "What inspired the structure of modern AI models?",
                        [
                            "The Steam Engine",
                            "The Human Brain",
                            "Crystal Formations",
                            "Solar Systems",
                        ],
                        1,
                    )],
                ),
            ],
        },
        Course {
            id: "gen-ai".to_string(),
            title: "Generative Frontier".to_string(),
            description: "Learn how machines create art, code, and language from thin air."
                .to_string(),
            icon: "✨".to_string(),
            color: "bg-purple-100 text-purple-600".to_string(),
            lessons: vec![lesson(
                "llm-basics",
                "The Power of Prediction",
                "12 min",
                "https://images.unsplash.com/photo-1614728263952-84ea256f9679?auto=format&fit=crop&q=80&w=1200",
                "Large Language Models are super-powered autocomplete. Having read nearly \
                 everything ever written, they model the statistical probability of words.",
                vec![question(
                    "What is the core mechanic of a Large Language Model?",
                    [
                        "Copying from Wikipedia",
                        "Statistical word prediction",
                        "Randomly picking letters",
                        "Connecting to a human operator",
                    ],
                    1,
                )],
            )],
        },
        Course {
            id: "ethics-ai".to_string(),
            title: "Digital Ethics".to_string(),
            description: "Building a future where AI is safe, fair, and helpful for everyone."
                .to_string(),
            icon: "⚖️".to_string(),
            color: "bg-emerald-100 text-emerald-600".to_string(),
            lessons: vec![lesson(
                "bias-check",
                "The Mirror of Data",
                "7 min",
                "https://images.unsplash.com/photo-1550751827-4bd374c3f58b?auto=format&fit=crop&q=80&w=1200",
                "AI reflects the data we give it. If the data contains biases, the model learns \
                 them too, so responsible development means checking that mirror constantly.",
                vec![question(
                    "Why is bias a problem in AI?",
                    [
                        "It makes the computer slow",
                        "It reflects human unfairness in code",
                        "It costs more money",
                        "It breaks the hardware",
                    ],
                    1,
                )],
            )],
        },
    ]
}

/// Look up a lesson by id across all courses
pub fn find_lesson(lesson_id: &str) -> Option<Lesson> {
    courses()
        .into_iter()
        .flat_map(|course| course.lessons)
        .find(|lesson| lesson.id == lesson_id)
}

/// Number of lessons across the whole catalog
pub fn lesson_count() -> usize {
    courses().iter().map(|c| c.lessons.len()).sum()
}
